//! Catalog facade.
//!
//! Product detail, the category list and the featured list go through the
//! response cache; filtered listings always hit the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::cache::keys;

use super::opt;
use crate::dispatch::{ApiClient, ApiError, ApiRequest};

/// Backend default for the featured list size.
pub const DEFAULT_FEATURED_LIMIT: u32 = 10;

/// A catalog product. Prices are in INR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<u32>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub specifications: Option<Value>,
    /// Only reported by the admin listing.
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

/// One page of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub has_more: bool,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub product_count: u32,
}

/// Filters for `GET /products`. Unset fields are omitted from the query.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProductQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        [
            opt("category", self.category.as_ref()),
            opt("search", self.search.as_ref()),
            opt("featured", self.featured),
            opt("min_price", self.min_price),
            opt("max_price", self.max_price),
            opt("page", self.page),
            opt("per_page", self.per_page),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// `/products/*` operations.
pub struct ProductApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Filtered, paginated listing. Never cached.
    pub async fn list(&self, query: &ProductQuery) -> Result<ProductList, ApiError> {
        self.client
            .send_as(ApiRequest::get("/products").query(query.pairs()))
            .await
    }

    /// Featured products, cached per `limit`.
    pub async fn featured(&self, limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        let key = keys::featured_products(limit.unwrap_or(DEFAULT_FEATURED_LIMIT));
        let req = ApiRequest::get("/products/featured").query(opt("limit", limit).into_iter().collect());
        self.client.get_cached(key, req).await
    }

    /// Category list, cached.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client
            .get_cached(keys::categories(), ApiRequest::get("/products/categories"))
            .await
    }

    /// Product detail, cached per id.
    pub async fn get(&self, id: &str) -> Result<Product, ApiError> {
        self.client
            .get_cached(keys::product(id), ApiRequest::get(format!("/products/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{client_for, logged_in_client};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn product_json(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": "Cotton",
            "price": 799.0,
            "original_price": 999.0,
            "discount_percentage": 20,
            "category": "Fashion",
            "stock_quantity": 12,
            "in_stock": true,
            "images": [],
            "is_featured": false,
            "tags": ["cotton"],
            "review_count": 3
        })
    }

    #[test]
    fn test_query_pairs_only_supplied() {
        assert!(ProductQuery::default().pairs().is_empty());

        let query = ProductQuery {
            category: Some("Fashion".into()),
            min_price: Some(100.5),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("category", "Fashion".to_string()),
                ("min_price", "100.5".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_passes_pagination_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .and(query_param("search", "shirt"))
            .and(query_param("page", "3"))
            .and(query_param("per_page", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [product_json("p1", "Shirt")],
                "total": 11, "page": 3, "per_page": 5, "has_more": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let query = ProductQuery { search: Some("shirt".into()), page: Some(3), per_page: Some(5), ..Default::default() };
        let list = client.products().list(&query).await.unwrap();

        assert_eq!(list.total, 11);
        assert_eq!(list.products[0].discount_percentage, Some(20));
    }

    #[tokio::test]
    async fn test_get_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json("42", "Shirt")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.products().get("42").await.unwrap();
        let second = client.products().get("42").await.unwrap();

        assert_eq!(first, second);
        assert!(client.cache().get("product_42").await.is_some());
    }

    #[tokio::test]
    async fn test_categories_and_featured_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "fashion", "name": "Fashion", "slug": "fashion", "product_count": 15}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products/featured"))
            .and(query_param("limit", "8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json("p1", "Shirt")])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        for _ in 0..2 {
            let categories = client.products().categories().await.unwrap();
            assert_eq!(categories[0].product_count, 15);

            let featured = client.products().featured(Some(8)).await.unwrap();
            assert_eq!(featured.len(), 1);
        }
        assert!(client.cache().get("featured_products_8").await.is_some());
    }

    #[tokio::test]
    async fn test_401_on_product_detail_clears_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/42"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Could not validate credentials"})))
            .mount(&server)
            .await;

        let client = logged_in_client(&server).await;
        let err = client.products().get("42").await.unwrap_err();

        assert!(err.is_auth_expired());
        assert!(!client.session().is_authenticated().await);
        assert!(client.cache().is_empty().await);
    }
}
