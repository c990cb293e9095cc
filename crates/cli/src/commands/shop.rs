use storefront_client::api::addresses::AddressInput;
use storefront_client::api::orders::{OrderCreate, PaymentInfo};
use storefront_client::api::products::ProductQuery;
use storefront_client::{ApiClient, ApiError};

use super::{json, wire_enum};
use crate::cli::{AddressCommands, CartCommands, OrderCommands, ProductCommands};
use crate::output::Output;

pub async fn products(client: &ApiClient, cmd: ProductCommands) -> Result<Output, ApiError> {
    let products = client.products();
    match cmd {
        ProductCommands::List(args) => {
            let query = ProductQuery {
                category: args.category,
                search: args.search,
                featured: args.featured,
                min_price: args.min_price,
                max_price: args.max_price,
                page: args.page,
                per_page: args.per_page,
            };
            json(&products.list(&query).await?)
        }
        ProductCommands::Get { id } => json(&products.get(&id).await?),
        ProductCommands::Featured { limit } => json(&products.featured(limit).await?),
        ProductCommands::Categories => json(&products.categories().await?),
    }
}

pub async fn cart(client: &ApiClient, cmd: CartCommands) -> Result<Output, ApiError> {
    let cart = client.cart();
    match cmd {
        CartCommands::Show => json(&cart.get().await?),
        CartCommands::Summary => json(&cart.summary().await?),
        CartCommands::Add { product_id, quantity } => json(&cart.add_item(&product_id, quantity).await?),
        CartCommands::Update { product_id, quantity } => json(&cart.update_item(&product_id, quantity).await?),
        CartCommands::Remove { product_id } => json(&cart.remove_item(&product_id).await?),
        CartCommands::Clear => {
            cart.clear().await?;
            Ok(Output::Message("Cart cleared".to_string()))
        }
    }
}

pub async fn addresses(client: &ApiClient, cmd: AddressCommands) -> Result<Output, ApiError> {
    let addresses = client.addresses();
    match cmd {
        AddressCommands::List => json(&addresses.list().await?),
        AddressCommands::Default => json(&addresses.default_address().await?),
        AddressCommands::Get { id } => json(&addresses.get(&id).await?),
        AddressCommands::Add(args) => {
            let input = AddressInput {
                full_name: args.full_name,
                phone: args.phone,
                address_line1: args.line1,
                address_line2: args.line2,
                landmark: args.landmark,
                city: args.city,
                state: args.state,
                pincode: args.pincode,
                country: args.country,
                address_type: wire_enum("address type", &args.address_type)?,
                is_default: args.default,
            };
            json(&addresses.create(&input).await?)
        }
        AddressCommands::Delete { id } => {
            addresses.delete(&id).await?;
            Ok(Output::Message(format!("Deleted address {id}")))
        }
        AddressCommands::SetDefault { id } => json(&addresses.set_default(&id).await?),
    }
}

pub async fn orders(client: &ApiClient, cmd: OrderCommands) -> Result<Output, ApiError> {
    let orders = client.orders();
    match cmd {
        OrderCommands::List { page, per_page } => json(&orders.list(page, per_page).await?),
        OrderCommands::Get { id } => json(&orders.get(&id).await?),
        OrderCommands::Place(args) => {
            let payment = PaymentInfo { upi_id: args.upi_id, ..PaymentInfo::new(wire_enum("payment", &args.payment)?) };
            let order = OrderCreate { address_id: args.address_id, payment, notes: args.notes, items: None };
            json(&orders.create(&order).await?)
        }
        OrderCommands::Cancel { id } => Ok(Output::Message(orders.cancel(&id).await?.message)),
        OrderCommands::Track { id } => json(&orders.track(&id).await?),
    }
}
