//! Top-level reaction to an expired session.
//!
//! The dispatcher only clears the session and returns
//! [`ApiError::AuthExpired`]; sending the user to the login page belongs to
//! whatever owns navigation (a browser shell, a CLI prompt, a TUI).

use crate::dispatch::ApiError;

/// Where the user currently is, and how to send them elsewhere.
pub trait Navigator {
    fn current_path(&self) -> String;

    fn redirect_to(&self, path: &str);
}

/// Redirects to the login page when a result reports an expired session.
#[derive(Debug, Clone)]
pub struct AuthRedirect<N> {
    navigator: N,
    login_path: String,
}

impl<N: Navigator> AuthRedirect<N> {
    pub fn new(navigator: N, login_path: impl Into<String>) -> Self {
        Self { navigator, login_path: login_path.into() }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Inspect `result`, redirecting on `AuthExpired` unless the user is
    /// already on the login page. The result is returned unchanged.
    pub fn handle<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::AuthExpired) = &result
            && !self.navigator.current_path().contains(&self.login_path)
        {
            tracing::info!(login_path = %self.login_path, "session expired; redirecting to login");
            self.navigator.redirect_to(&self.login_path);
        }
        result
    }
}
