//! Authentication facade: password login, OTP flows, token refresh, logout.
//!
//! Regular customers log in with an emailed one-time code; admins log in
//! with a password. `pre_login` tells the caller which path applies.

use serde::{Deserialize, Serialize};
use storefront_core::User;

use crate::dispatch::{ApiClient, ApiError, ApiRequest};

/// Account registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Access token plus the profile it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Result of the credential check that precedes login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PreLoginResponse {
    pub require_otp: bool,
    pub email: String,
}

/// What an OTP is being issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPurpose {
    Register,
    Login,
}

#[derive(Debug, Clone, Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    purpose: OtpPurpose,
}

#[derive(Debug, Clone, Serialize)]
struct OtpVerifyRequest<'a> {
    email: &'a str,
    otp: &'a str,
    purpose: OtpPurpose,
}

#[derive(Debug, Clone, Serialize)]
struct OtpLoginRequest<'a> {
    email: &'a str,
    otp: &'a str,
}

/// Acknowledgement of an OTP send/resend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OtpResponse {
    pub message: String,
    pub email: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OtpVerifyResponse {
    pub verified: bool,
    pub message: String,
    #[serde(default)]
    pub verification_token: Option<String>,
}

/// `/auth/*` operations.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create an account and start a session for it.
    pub async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        let resp: TokenResponse = self
            .client
            .send_as(ApiRequest::post("/auth/register").json(req)?)
            .await?;
        self.store(&resp).await?;
        Ok(resp)
    }

    /// Password login. A rejected password surfaces as [`ApiError::Api`] and
    /// leaves any existing session untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let resp: TokenResponse = self
            .client
            .send_as(ApiRequest::post("/auth/login").json(&Credentials { email, password })?)
            .await?;
        self.store(&resp).await?;
        Ok(resp)
    }

    /// Check credentials and learn whether an OTP step is required.
    pub async fn pre_login(&self, email: &str, password: &str) -> Result<PreLoginResponse, ApiError> {
        self.client
            .send_as(ApiRequest::post("/auth/pre-login").json(&Credentials { email, password })?)
            .await
    }

    /// Tell the backend we are leaving, then drop local state.
    ///
    /// The network call is best effort: its failure is logged and ignored so
    /// the session and cache are always cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.client.session().is_authenticated().await
            && let Err(e) = self.client.send(ApiRequest::post("/auth/logout")).await
        {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }

        self.client.cache().clear().await;
        self.client.session().clear_session().await?;
        Ok(())
    }

    /// Profile of the token holder, straight from the backend.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.client.send_as(ApiRequest::get("/auth/me")).await
    }

    /// Exchange the current token for a fresh one. Only the token is stored.
    pub async fn refresh(&self) -> Result<TokenResponse, ApiError> {
        let resp: TokenResponse = self.client.send_as(ApiRequest::post("/auth/refresh")).await?;
        self.client.session().update_token(resp.access_token.clone()).await?;
        Ok(resp)
    }

    pub async fn send_otp(&self, email: &str, purpose: OtpPurpose) -> Result<OtpResponse, ApiError> {
        self.client
            .send_as(ApiRequest::post("/auth/otp/send").json(&OtpRequest { email, purpose })?)
            .await
    }

    pub async fn verify_otp(
        &self, email: &str, otp: &str, purpose: OtpPurpose,
    ) -> Result<OtpVerifyResponse, ApiError> {
        self.client
            .send_as(ApiRequest::post("/auth/otp/verify").json(&OtpVerifyRequest { email, otp, purpose })?)
            .await
    }

    pub async fn resend_otp(&self, email: &str, purpose: OtpPurpose) -> Result<OtpResponse, ApiError> {
        self.client
            .send_as(ApiRequest::post("/auth/otp/resend").json(&OtpRequest { email, purpose })?)
            .await
    }

    /// Passwordless login with an emailed code.
    pub async fn login_otp(&self, email: &str, otp: &str) -> Result<TokenResponse, ApiError> {
        let resp: TokenResponse = self
            .client
            .send_as(ApiRequest::post("/auth/login-otp").json(&OtpLoginRequest { email, otp })?)
            .await?;
        self.store(&resp).await?;
        Ok(resp)
    }

    async fn store(&self, resp: &TokenResponse) -> Result<(), ApiError> {
        self.client
            .session()
            .set_session(resp.access_token.clone(), resp.user.clone())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{client_for, logged_in_client, user_json};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token_body(token: &str) -> serde_json::Value {
        json!({"access_token": token, "token_type": "bearer", "user": user_json("u1")})
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"email": "u1@example.com", "password": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-login")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let resp = client.auth().login("u1@example.com", "secret").await.unwrap();

        assert_eq!(resp.token_type, "bearer");
        assert_eq!(client.session().token().await.as_deref(), Some("tok-login"));
        assert_eq!(client.session().current_user().await.unwrap().id, "u1");
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_logged_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid credentials"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.auth().login("u1@example.com", "wrong").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_register_stores_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(json!({
                "email": "u1@example.com",
                "password": "Secret123",
                "first_name": "Asha",
                "last_name": "Rao"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(token_body("tok-new")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let req = RegisterRequest {
            email: "u1@example.com".into(),
            password: "Secret123".into(),
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            phone: None,
        };
        client.auth().register(&req).await.unwrap();
        assert_eq!(client.session().token().await.as_deref(), Some("tok-new"));
    }

    #[tokio::test]
    async fn test_pre_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/pre-login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"require_otp": true, "email": "u1@example.com"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let resp = client.auth().pre_login("u1@example.com", "secret").await.unwrap();
        assert!(resp.require_otp);
        assert!(!client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_otp_flow() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/otp/send"))
            .and(body_json(json!({"email": "u1@example.com", "purpose": "login"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "OTP sent", "email": "u1@example.com", "expires_in": 600
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login-otp"))
            .and(body_json(json!({"email": "u1@example.com", "otp": "123456"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-otp")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let sent = client.auth().send_otp("u1@example.com", OtpPurpose::Login).await.unwrap();
        assert_eq!(sent.expires_in, 600);

        client.auth().login_otp("u1@example.com", "123456").await.unwrap();
        assert_eq!(client.session().token().await.as_deref(), Some("tok-otp"));
    }

    #[tokio::test]
    async fn test_wrong_otp_does_not_clear_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/otp/verify"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid OTP"})))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let err = client
            .auth()
            .verify_otp("u1@example.com", "000000", OtpPurpose::Register)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid OTP");
        assert!(client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_refresh_replaces_token_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-2",
                "token_type": "bearer",
                "user": {"id": "u1", "email": "u1@example.com", "first_name": "", "last_name": ""}
            })))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        client.auth().refresh().await.unwrap();

        assert_eq!(client.session().token().await.as_deref(), Some("tok-2"));
        assert_eq!(client.session().current_user().await.unwrap().first_name, "Asha");
    }

    #[tokio::test]
    async fn test_logout_clears_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Successfully logged out"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        client.cache().set("categories", json!([])).await;

        client.auth().logout().await.unwrap();
        assert!(!client.session().is_authenticated().await);
        assert!(client.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_logout_ignores_server_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        assert!(client.auth().logout().await.is_ok());
        assert!(!client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_without_session_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.auth().logout().await.is_ok());
    }

    #[tokio::test]
    async fn test_me() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1")))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        assert_eq!(client.auth().me().await.unwrap().email, "u1@example.com");
    }
}
