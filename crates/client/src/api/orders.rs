//! Checkout, order history and tracking.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{MessageResponse, opt};
use crate::dispatch::{ApiClient, ApiError, ApiRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
    Returned,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
            Self::Refunded => "refunded",
        }
    }

    /// The backend only accepts cancellation before processing starts.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Upi,
    NetBanking,
    Wallet,
    Cod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
    Cancelled,
}

/// Payment details sent at checkout. Only the last four card digits ever leave the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl PaymentInfo {
    pub fn new(method: PaymentMethod) -> Self {
        Self { method, card_last_four: None, card_brand: None, upi_id: None, transaction_id: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemCreate {
    pub product_id: String,
    pub quantity: u32,
}

/// Checkout payload. Without `items` the backend orders the cart contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCreate {
    pub address_id: String,
    pub payment: PaymentInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItemCreate>>,
}

/// A line item with its price locked at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_image: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
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
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub subtotal: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderList {
    pub orders: Vec<Order>,
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

/// Returned by checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub success: bool,
    pub order_id: String,
    pub order_number: String,
    pub transaction_id: String,
    pub payment_method: PaymentMethod,
    pub amount: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingStep {
    pub status: OrderStatus,
    pub label: String,
    pub completed: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracking {
    pub order_id: String,
    pub order_number: String,
    pub current_status: OrderStatus,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TrackingStep>,
}

/// `/orders/*` operations.
pub struct OrderApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OrderApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Order history, newest first. Unset paging falls back to backend defaults.
    pub async fn list(&self, page: Option<u32>, per_page: Option<u32>) -> Result<OrderList, ApiError> {
        let pairs = [opt("page", page), opt("per_page", per_page)].into_iter().flatten().collect();
        self.client.send_as(ApiRequest::get("/orders").query(pairs)).await
    }

    pub async fn get(&self, id: &str) -> Result<Order, ApiError> {
        self.client.send_as(ApiRequest::get(format!("/orders/{id}"))).await
    }

    /// Place an order and simulate payment.
    pub async fn create(&self, order: &OrderCreate) -> Result<PaymentConfirmation, ApiError> {
        let confirmation: PaymentConfirmation = self
            .client
            .send_as(ApiRequest::post("/orders").json(order)?)
            .await?;
        tracing::info!(order_number = %confirmation.order_number, "order placed");
        Ok(confirmation)
    }

    pub async fn cancel(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .send_as(ApiRequest::post(format!("/orders/{id}/cancel")))
            .await
    }

    pub async fn track(&self, id: &str) -> Result<Tracking, ApiError> {
        self.client.send_as(ApiRequest::get(format!("/orders/{id}/track"))).await
    }
}
