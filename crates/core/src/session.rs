//! Authenticated session state.
//!
//! The session is the bearer token plus a snapshot of the signed-in user.
//! Both halves are written and cleared together; every mutation is written
//! through to the [`SessionStorage`] before the in-memory copy changes, so a
//! reloaded process hydrates the same state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::Error;
use crate::storage::{MemoryStorage, SessionStorage};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key for the serialized user profile.
pub const USER_KEY: &str = "user";

/// Profile snapshot of the signed-in user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// "First Last", or the email when no name is on file.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() { self.email.clone() } else { name.to_string() }
    }
}

/// Token and user, present together or absent together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Session store with write-through persistence.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<Session>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Hydrate a store from persisted state.
    ///
    /// A half-present session (token without user or the reverse) or an
    /// unreadable user record is discarded and both keys are removed.
    pub async fn load(storage: Arc<dyn SessionStorage>) -> Result<Self, Error> {
        let token = storage.get(TOKEN_KEY).await?;
        let user = match storage.get(USER_KEY).await? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable persisted user");
                    None
                }
            },
            None => None,
        };

        let session = match (token, user) {
            (Some(token), Some(user)) => {
                tracing::debug!(user_id = %user.id, "hydrated persisted session");
                Session { token: Some(token), user: Some(user) }
            }
            (None, None) => Session::default(),
            _ => {
                tracing::warn!("persisted session incomplete; clearing");
                storage.remove(TOKEN_KEY).await?;
                storage.remove(USER_KEY).await?;
                Session::default()
            }
        };

        Ok(Self { storage, state: RwLock::new(session) })
    }

    /// A logged-out store over fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self { storage: Arc::new(MemoryStorage::new()), state: RwLock::new(Session::default()) }
    }

    /// Store token and user together.
    ///
    /// If the user record cannot be written the previous token is restored
    /// and the in-memory session is left untouched. Should the restore fail as
    /// well, the session is cleared in memory and in storage.
    pub async fn set_session(&self, token: String, user: User) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let user_json = serde_json::to_string(&user)?;

        self.storage.set(TOKEN_KEY, &token).await?;
        if let Err(e) = self.storage.set(USER_KEY, &user_json).await {
            tracing::warn!(error = %e, "user write failed; restoring previous session");
            self.restore_token(&mut state).await;
            return Err(e);
        }

        tracing::debug!(user_id = %user.id, "session stored");
        *state = Session { token: Some(token), user: Some(user) };
        Ok(())
    }

    /// Put the persisted token back to what `state` holds. The user record is
    /// untouched by a failed write, so this re-pairs it with its token.
    async fn restore_token(&self, state: &mut Session) {
        let restored = match &state.token {
            Some(previous) => self.storage.set(TOKEN_KEY, previous).await,
            None => self.storage.remove(TOKEN_KEY).await,
        };
        let Err(e) = restored else { return };

        tracing::warn!(error = %e, "token restore failed; clearing session");
        *state = Session::default();
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key).await {
                tracing::warn!(key, error = %e, "failed to remove persisted session key");
            }
        }
    }

    /// Remove token and user.
    ///
    /// The in-memory session is cleared first, so `is_authenticated` is false
    /// afterwards even when the storage delete fails.
    pub async fn clear_session(&self) -> Result<(), Error> {
        let mut state = self.state.write().await;
        *state = Session::default();

        let token_result = self.storage.remove(TOKEN_KEY).await;
        let user_result = self.storage.remove(USER_KEY).await;
        tracing::debug!("session cleared");
        token_result.and(user_result)
    }

    /// Replace the stored user, keeping the token. Ignored when logged out.
    pub async fn update_user(&self, user: User) -> Result<(), Error> {
        let mut state = self.state.write().await;
        if !state.is_authenticated() {
            tracing::debug!("ignoring user update without a session");
            return Ok(());
        }

        self.storage.set(USER_KEY, &serde_json::to_string(&user)?).await?;
        state.user = Some(user);
        Ok(())
    }

    /// Replace the stored token, keeping the user. Ignored when logged out.
    pub async fn update_token(&self, token: String) -> Result<(), Error> {
        let mut state = self.state.write().await;
        if state.user.is_none() {
            tracing::debug!("ignoring token update without a session");
            return Ok(());
        }

        self.storage.set(TOKEN_KEY, &token).await?;
        state.token = Some(token);
        Ok(())
    }

    /// True iff a token is present. No validity check is made.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// Last stored user snapshot. Never touches the network.
    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// True when the signed-in user carries the admin flag.
    pub async fn is_admin(&self) -> bool {
        let state = self.state.read().await;
        state.is_authenticated() && state.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }
}
