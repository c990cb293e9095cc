//! Command handlers. Each one drives a facade and returns what to print.

mod account;
mod admin;
mod shop;

use serde::Serialize;
use serde::de::DeserializeOwned;
use storefront_client::{ApiClient, ApiError};

use crate::cli::Commands;
use crate::output::Output;

pub use admin::ensure_admin;

pub async fn execute(client: &ApiClient, command: Commands) -> Result<Output, ApiError> {
    match command {
        Commands::Login(args) => account::login(client, args).await,
        Commands::Register(args) => account::register(client, args).await,
        Commands::Logout => account::logout(client).await,
        Commands::Whoami => account::whoami(client).await,
        Commands::Refresh => account::refresh(client).await,
        Commands::Products(cmd) => shop::products(client, cmd).await,
        Commands::Cart(cmd) => shop::cart(client, cmd).await,
        Commands::Addresses(cmd) => shop::addresses(client, cmd).await,
        Commands::Orders(cmd) => shop::orders(client, cmd).await,
        Commands::Admin(cmd) => admin::run(client, cmd).await,
    }
}

fn json<T: Serialize>(value: &T) -> Result<Output, ApiError> {
    Ok(Output::Json(serde_json::to_value(value)?))
}

/// Parse a backend enum value given on the command line, e.g. `net_banking`.
fn wire_enum<T: DeserializeOwned>(field: &str, value: &str) -> Result<T, ApiError> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| ApiError::InvalidRequest(format!("unknown {field}: {value}")))
}
