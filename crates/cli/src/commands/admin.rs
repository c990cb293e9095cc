use anyhow::bail;
use storefront_client::api::admin::{
    AdminOrderQuery, AdminProductQuery, AdminUserQuery, ProductCreate, ProductUpdate,
};
use storefront_client::{ApiClient, ApiError};

use super::json;
use crate::cli::{AdminCommands, CreateProductArgs, UpdateProductArgs};
use crate::output::Output;

/// Refuse admin commands for anyone but a signed-in admin. The backend
/// enforces the same rule; this only saves the round trip.
pub async fn ensure_admin(client: &ApiClient) -> anyhow::Result<()> {
    if client.session().is_admin().await {
        return Ok(());
    }
    match client.session().current_user().await {
        Some(user) => bail!("permission denied: {} is not an admin account", user.email),
        None => bail!("permission denied: sign in with an admin account first"),
    }
}

pub async fn run(client: &ApiClient, cmd: AdminCommands) -> Result<Output, ApiError> {
    let admin = client.admin();
    match cmd {
        AdminCommands::Stats => json(&admin.stats().await?),
        AdminCommands::Products { search, category, page } => {
            let query = AdminProductQuery { page, search, category, ..Default::default() };
            json(&admin.products(&query).await?)
        }
        AdminCommands::ToggleProduct { id } => Ok(Output::Message(admin.toggle_product_active(&id).await?.message)),
        AdminCommands::CreateProduct(args) => json(&admin.create_product(&product_create(args)).await?),
        AdminCommands::UpdateProduct(args) => {
            let id = args.id.clone();
            let update = product_update(args);
            if update.is_empty() {
                return Err(ApiError::InvalidRequest("nothing to update".to_string()));
            }
            json(&admin.update_product(&id, &update).await?)
        }
        AdminCommands::DeleteProduct { id } => {
            admin.delete_product(&id).await?;
            Ok(Output::Message(format!("Deleted product {id}")))
        }
        AdminCommands::Orders { status, search, page } => {
            let query = AdminOrderQuery { page, status, search, ..Default::default() };
            json(&admin.orders(&query).await?)
        }
        AdminCommands::Order { id } => json(&admin.order(&id).await?),
        AdminCommands::SetOrderStatus { id, status, notes } => {
            json(&admin.update_order_status(&id, &status, notes.as_deref()).await?)
        }
        AdminCommands::Users { search, status, page } => {
            let query = AdminUserQuery { page, search, status, ..Default::default() };
            json(&admin.users(&query).await?)
        }
        AdminCommands::User { id } => json(&admin.user(&id).await?),
        AdminCommands::SetUserStatus { id, inactive } => json(&admin.update_user_status(&id, !inactive).await?),
    }
}

fn product_create(args: CreateProductArgs) -> ProductCreate {
    ProductCreate {
        original_price: args.original_price,
        brand: args.brand,
        sku: args.sku,
        stock_quantity: args.stock,
        images: args.images,
        thumbnail: args.thumbnail,
        is_active: !args.inactive,
        is_featured: args.featured,
        tags: args.tags,
        ..ProductCreate::new(args.name, args.description, args.price, args.category)
    }
}

fn product_update(args: UpdateProductArgs) -> ProductUpdate {
    ProductUpdate {
        name: args.name,
        description: args.description,
        price: args.price,
        original_price: args.original_price,
        category: args.category,
        brand: args.brand,
        sku: args.sku,
        stock_quantity: args.stock,
        thumbnail: args.thumbnail,
        is_active: args.active,
        is_featured: args.featured,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use clap::Parser;
    use storefront_client::ClientConfig;
    use storefront_core::{SessionStore, User};

    use crate::cli::{Cli, Commands};

    fn client() -> ApiClient {
        ApiClient::new(ClientConfig::default(), Arc::new(SessionStore::in_memory())).unwrap()
    }

    fn user(is_admin: bool) -> User {
        serde_json::from_value(serde_json::json!({"id": "u1", "email": "asha@example.com", "is_admin": is_admin}))
            .unwrap()
    }

    fn admin_command(args: &[&str]) -> AdminCommands {
        let argv: Vec<&str> = ["storefront", "admin"].into_iter().chain(args.iter().copied()).collect();
        match Cli::parse_from(argv).command {
            Commands::Admin(cmd) => cmd,
            _ => panic!("expected an admin command"),
        }
    }

    #[tokio::test]
    async fn test_ensure_admin() {
        let client = client();
        let err = ensure_admin(&client).await.unwrap_err();
        assert_eq!(err.to_string(), "permission denied: sign in with an admin account first");

        client.session().set_session("tok".into(), user(false)).await.unwrap();
        let err = ensure_admin(&client).await.unwrap_err();
        assert_eq!(err.to_string(), "permission denied: asha@example.com is not an admin account");

        client.session().set_session("tok".into(), user(true)).await.unwrap();
        assert!(ensure_admin(&client).await.is_ok());
    }

    #[test]
    fn test_create_product_args() {
        let cmd = admin_command(&[
            "create-product", "--name", "Cotton Kurta", "--description", "Handloom cotton", "--price", "999",
            "--category", "Clothing", "--stock", "25", "--tag", "ethnic", "--tag", "summer", "--inactive",
        ]);
        let AdminCommands::CreateProduct(args) = cmd else { panic!("expected create-product") };

        let product = product_create(args);
        assert_eq!(product.stock_quantity, 25);
        assert_eq!(product.tags, vec!["ethnic".to_string(), "summer".to_string()]);
        assert!(!product.is_active);
        assert!(!product.is_featured);
    }

    #[test]
    fn test_update_product_args() {
        let AdminCommands::UpdateProduct(args) = admin_command(&["update-product", "p1", "--price", "899"]) else {
            panic!("expected update-product")
        };
        let update = product_update(args);
        assert_eq!(update, ProductUpdate { price: Some(899.0), ..Default::default() });

        let AdminCommands::UpdateProduct(args) = admin_command(&["update-product", "p1"]) else {
            panic!("expected update-product")
        };
        assert!(product_update(args).is_empty());
    }
}
