//! Admin dashboard facade.
//!
//! Every endpoint here requires an admin-flagged session; the backend answers
//! 403 otherwise. Callers can check [`storefront_core::SessionStore::is_admin`]
//! before offering these operations, but the backend remains the authority.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::cache::keys;

use super::opt;
use super::orders::OrderItem;
use super::products::{Product, ProductList};
use crate::dispatch::{ApiClient, ApiError, ApiRequest};

/// Dashboard counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_products: u64,
    pub active_products: u64,
    pub total_orders: u64,
    pub total_users: u64,
    pub active_users: u64,
    /// Revenue from completed orders, INR.
    pub total_revenue: f64,
    #[serde(default)]
    pub orders_by_status: HashMap<String, u64>,
    /// Orders placed in the last 7 days.
    #[serde(default)]
    pub recent_orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOrderUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// An order with customer details. Status fields are left as strings since
/// admins may see legacy values the storefront enums don't cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOrder {
    pub id: String,
    pub order_number: String,
    #[serde(default)]
    pub user: Option<AdminOrderUser>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Option<Value>,
    pub status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
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
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOrderList {
    #[serde(default)]
    pub orders: Vec<AdminOrder>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
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
    pub order_count: u64,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUserList {
    #[serde(default)]
    pub users: Vec<AdminUser>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductToggle {
    pub id: String,
    pub is_active: bool,
    pub message: String,
}

/// Body for `POST /products`. Prices are in INR.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub stock_quantity: u32,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Value>,
    pub is_active: bool,
    pub is_featured: bool,
    pub tags: Vec<String>,
}

impl ProductCreate {
    /// A visible, unfeatured product with no stock, images or tags.
    pub fn new(
        name: impl Into<String>, description: impl Into<String>, price: f64, category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            original_price: None,
            category: category.into(),
            brand: None,
            sku: None,
            stock_quantity: 0,
            images: Vec::new(),
            thumbnail: None,
            specifications: None,
            is_active: true,
            is_featured: false,
            tags: Vec::new(),
        }
    }
}

/// Body for `PUT /products/{id}`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

/// Filters for `GET /admin/products`, which includes inactive products.
#[derive(Debug, Clone, Default)]
pub struct AdminProductQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl AdminProductQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        [
            opt("page", self.page),
            opt("per_page", self.per_page),
            opt("search", self.search.as_ref()),
            opt("category", self.category.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminOrderQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    /// Order number or customer email.
    pub search: Option<String>,
}

impl AdminOrderQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        [
            opt("page", self.page),
            opt("per_page", self.per_page),
            opt("status", self.status.as_ref()),
            opt("search", self.search.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminUserQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    /// `active`, `inactive` or `admin`.
    pub status: Option<String>,
}

impl AdminUserQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        [
            opt("page", self.page),
            opt("per_page", self.per_page),
            opt("search", self.search.as_ref()),
            opt("status", self.status.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
struct OrderStatusUpdate<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
struct UserStatusUpdate {
    is_active: bool,
}

/// `/admin/*` operations.
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<AdminStats, ApiError> {
        self.client.send_as(ApiRequest::get("/admin/stats")).await
    }

    pub async fn products(&self, query: &AdminProductQuery) -> Result<ProductList, ApiError> {
        self.client
            .send_as(ApiRequest::get("/admin/products").query(query.pairs()))
            .await
    }

    /// Flip a product's visibility. The cached storefront copy is dropped so
    /// the next detail read sees the new state.
    pub async fn toggle_product_active(&self, id: &str) -> Result<ProductToggle, ApiError> {
        let toggle: ProductToggle = self
            .client
            .send_as(ApiRequest::put(format!("/admin/products/{id}/toggle-active")))
            .await?;
        self.client.cache().invalidate(&keys::product(id)).await;
        Ok(toggle)
    }

    /// Add a product to the catalog.
    pub async fn create_product(&self, product: &ProductCreate) -> Result<Product, ApiError> {
        let created: Product = self.client.send_as(ApiRequest::post("/products").json(product)?).await?;
        tracing::info!(product_id = %created.id, "product created");
        Ok(created)
    }

    /// Partial update; the cached storefront copy is dropped on success.
    pub async fn update_product(&self, id: &str, update: &ProductUpdate) -> Result<Product, ApiError> {
        let product: Product = self
            .client
            .send_as(ApiRequest::put(format!("/products/{id}")).json(update)?)
            .await?;
        self.client.cache().invalidate(&keys::product(id)).await;
        Ok(product)
    }

    /// Soft delete: the backend marks the product inactive and answers 204.
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.client.send(ApiRequest::delete(format!("/products/{id}"))).await?;
        self.client.cache().invalidate(&keys::product(id)).await;
        Ok(())
    }

    pub async fn orders(&self, query: &AdminOrderQuery) -> Result<AdminOrderList, ApiError> {
        self.client
            .send_as(ApiRequest::get("/admin/orders").query(query.pairs()))
            .await
    }

    pub async fn order(&self, id: &str) -> Result<AdminOrder, ApiError> {
        self.client.send_as(ApiRequest::get(format!("/admin/orders/{id}"))).await
    }

    pub async fn update_order_status(
        &self, id: &str, status: &str, notes: Option<&str>,
    ) -> Result<AdminOrder, ApiError> {
        let body = OrderStatusUpdate { status, notes };
        self.client
            .send_as(ApiRequest::put(format!("/admin/orders/{id}/status")).json(&body)?)
            .await
    }

    pub async fn users(&self, query: &AdminUserQuery) -> Result<AdminUserList, ApiError> {
        self.client
            .send_as(ApiRequest::get("/admin/users").query(query.pairs()))
            .await
    }

    pub async fn user(&self, id: &str) -> Result<AdminUser, ApiError> {
        self.client.send_as(ApiRequest::get(format!("/admin/users/{id}"))).await
    }

    pub async fn update_user_status(&self, id: &str, is_active: bool) -> Result<AdminUser, ApiError> {
        self.client
            .send_as(ApiRequest::put(format!("/admin/users/{id}/status")).json(&UserStatusUpdate { is_active })?)
            .await
    }
}
