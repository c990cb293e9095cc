//! Domain API facades.
//!
//! Each facade borrows the [`ApiClient`] and maps named parameters onto a
//! path, method and body. Facades hold no state of their own; the few that
//! touch the session or cache (login, register, refresh, profile update,
//! logout) do so only after the backend call succeeds.

pub mod addresses;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use serde::{Deserialize, Serialize};

use crate::dispatch::ApiClient;

pub use addresses::AddressApi;
pub use admin::AdminApi;
pub use auth::AuthApi;
pub use cart::CartApi;
pub use orders::OrderApi;
pub use products::ProductApi;
pub use users::UserApi;

/// Plain `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A query pair, present only when the caller supplied a value.
pub(crate) fn opt<T: ToString>(name: &'static str, value: Option<T>) -> Option<(&'static str, String)> {
    value.map(|v| (name, v.to_string()))
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn products(&self) -> ProductApi<'_> {
        ProductApi::new(self)
    }

    pub fn cart(&self) -> CartApi<'_> {
        CartApi::new(self)
    }

    pub fn addresses(&self) -> AddressApi<'_> {
        AddressApi::new(self)
    }

    pub fn orders(&self) -> OrderApi<'_> {
        OrderApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use serde_json::{Value, json};
    use storefront_core::{SessionStore, User};
    use wiremock::MockServer;

    use crate::dispatch::{ApiClient, ClientConfig};

    pub fn client_for(server: &MockServer) -> ApiClient {
        let config = ClientConfig { base_url: format!("{}/api", server.uri()), ..Default::default() };
        ApiClient::new(config, Arc::new(SessionStore::in_memory())).unwrap()
    }

    pub fn user_json(id: &str) -> Value {
        json!({
            "id": id,
            "email": format!("{id}@example.com"),
            "first_name": "Asha",
            "last_name": "Rao",
            "phone": null,
            "is_active": true,
            "created_at": "2024-01-15T10:00:00Z"
        })
    }

    pub fn user(id: &str) -> User {
        serde_json::from_value(user_json(id)).unwrap()
    }

    pub async fn logged_in_client(server: &MockServer) -> ApiClient {
        let client = client_for(server);
        client.session().set_session("tok".into(), user("u1")).await.unwrap();
        client
    }
}
