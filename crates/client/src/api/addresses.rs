//! Delivery address book facade.

use serde::{Deserialize, Serialize};

use crate::dispatch::{ApiClient, ApiError, ApiRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    #[default]
    Home,
    Work,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub address_type: AddressType,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// New address payload.
#[derive(Debug, Clone, Serialize)]
pub struct AddressInput {
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub address_type: AddressType,
    pub is_default: bool,
}

/// Partial address update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddressUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<AddressType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// `/addresses/*` operations.
pub struct AddressApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AddressApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Address>, ApiError> {
        self.client.send_as(ApiRequest::get("/addresses")).await
    }

    pub async fn default_address(&self) -> Result<Address, ApiError> {
        self.client.send_as(ApiRequest::get("/addresses/default")).await
    }

    pub async fn get(&self, id: &str) -> Result<Address, ApiError> {
        self.client.send_as(ApiRequest::get(format!("/addresses/{id}"))).await
    }

    pub async fn create(&self, input: &AddressInput) -> Result<Address, ApiError> {
        self.client
            .send_as(ApiRequest::post("/addresses").json(input)?)
            .await
    }

    pub async fn update(&self, id: &str, update: &AddressUpdate) -> Result<Address, ApiError> {
        self.client
            .send_as(ApiRequest::put(format!("/addresses/{id}")).json(update)?)
            .await
    }

    /// Delete an address. The backend answers 204 with no body.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.send(ApiRequest::delete(format!("/addresses/{id}"))).await?;
        Ok(())
    }

    pub async fn set_default(&self, id: &str) -> Result<Address, ApiError> {
        self.client
            .send_as(ApiRequest::post(format!("/addresses/{id}/set-default")))
            .await
    }
}
