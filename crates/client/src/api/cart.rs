//! Cart facade. Never cached: quantities and stock must be current.

use serde::{Deserialize, Serialize};

use crate::dispatch::{ApiClient, ApiError, ApiRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_image: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub subtotal: f64,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: i64,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub item_count: u32,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub shipping: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Header badge data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: u32,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
struct AddItem<'a> {
    product_id: &'a str,
    quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
struct UpdateItem {
    quantity: u32,
}

/// `/cart/*` operations.
pub struct CartApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CartApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Cart, ApiError> {
        self.client.send_as(ApiRequest::get("/cart")).await
    }

    pub async fn summary(&self) -> Result<CartSummary, ApiError> {
        self.client.send_as(ApiRequest::get("/cart/summary")).await
    }

    pub async fn add_item(&self, product_id: &str, quantity: u32) -> Result<Cart, ApiError> {
        self.client
            .send_as(ApiRequest::post("/cart/items").json(&AddItem { product_id, quantity })?)
            .await
    }

    pub async fn update_item(&self, product_id: &str, quantity: u32) -> Result<Cart, ApiError> {
        self.client
            .send_as(ApiRequest::put(format!("/cart/items/{product_id}")).json(&UpdateItem { quantity })?)
            .await
    }

    pub async fn remove_item(&self, product_id: &str) -> Result<Cart, ApiError> {
        self.client
            .send_as(ApiRequest::delete(format!("/cart/items/{product_id}")))
            .await
    }

    /// Empty the cart. The backend answers 204 with no body.
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.client.send(ApiRequest::delete("/cart")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::logged_in_client;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cart_json(quantity: u32) -> Value {
        json!({
            "id": "c1",
            "user_id": "u1",
            "items": [{
                "product_id": "p1",
                "product_name": "Shirt",
                "price": 500.0,
                "quantity": quantity,
                "subtotal": 500.0 * quantity as f64,
                "in_stock": true,
                "stock_quantity": 10
            }],
            "item_count": quantity,
            "subtotal": 500.0 * quantity as f64,
            "shipping": 0.0,
            "total": 500.0 * quantity as f64
        })
    }

    #[tokio::test]
    async fn test_add_and_update_item() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cart/items"))
            .and(body_json(json!({"product_id": "p1", "quantity": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(1)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/cart/items/p1"))
            .and(body_json(json!({"quantity": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(3)))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let cart = client.cart().add_item("p1", 1).await.unwrap();
        assert_eq!(cart.item_count, 1);

        let cart = client.cart().update_item("p1", 3).await.unwrap();
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total, 1500.0);
    }

    #[tokio::test]
    async fn test_cart_reads_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/cart/summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item_count": 2, "total": 1000.0})))
            .expect(2)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        client.cart().summary().await.unwrap();
        client.cart().summary().await.unwrap();
        assert!(client.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/cart/items/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1", "user_id": "u1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/cart"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let cart = client.cart().remove_item("p1").await.unwrap();
        assert!(cart.items.is_empty());
        client.cart().clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_stock_error_surfaces_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cart/items"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Only 2 items in stock"})))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let err = client.cart().add_item("p1", 5).await.unwrap_err();
        assert_eq!(err.to_string(), "Only 2 items in stock");
    }
}
