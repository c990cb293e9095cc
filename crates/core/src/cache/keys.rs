//! Cache key builders for the cacheable catalog reads.

/// Key for a single product detail.
pub fn product(id: &str) -> String {
    format!("product_{id}")
}

/// Key for the category list.
pub fn categories() -> String {
    "categories".to_string()
}

/// Key for the featured list; each `limit` is cached separately.
pub fn featured_products(limit: u32) -> String {
    format!("featured_products_{limit}")
}
