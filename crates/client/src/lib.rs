//! Client for the storefront REST backend.
//!
//! This crate provides the request dispatcher, its error taxonomy, the
//! auth-expiry redirect hook and typed facades for each backend resource.

pub mod api;
pub mod dispatch;
pub mod redirect;

pub use api::{AddressApi, AdminApi, AuthApi, CartApi, MessageResponse, OrderApi, ProductApi, UserApi};
pub use dispatch::{ApiClient, ApiError, ApiRequest, ClientConfig};
pub use redirect::{AuthRedirect, Navigator};
