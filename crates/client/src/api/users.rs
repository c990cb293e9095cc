//! Profile facade.

use serde::Serialize;
use storefront_core::User;

use super::MessageResponse;
use crate::dispatch::{ApiClient, ApiError, ApiRequest};

/// Partial profile update; unset fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct PasswordChange<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// `/users/*` operations.
pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_profile(&self) -> Result<User, ApiError> {
        self.client.send_as(ApiRequest::get("/users/profile")).await
    }

    /// Update the profile and refresh the stored user snapshot.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let user: User = self
            .client
            .send_as(ApiRequest::put("/users/profile").json(update)?)
            .await?;
        self.client.session().update_user(user.clone()).await?;
        Ok(user)
    }

    pub async fn change_password(
        &self, current_password: &str, new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = PasswordChange { current_password, new_password };
        self.client
            .send_as(ApiRequest::post("/users/change-password").json(&body)?)
            .await
    }

    /// Deactivate the account, then drop the local session and cache.
    pub async fn delete_account(&self) -> Result<MessageResponse, ApiError> {
        let resp: MessageResponse = self.client.send_as(ApiRequest::delete("/users/account")).await?;
        self.client.cache().clear().await;
        self.client.session().clear_session().await?;
        Ok(resp)
    }
}
