use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the catalog, manage your cart and orders, and run the admin dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in (password, or email OTP for customer accounts)
    Login(LoginArgs),
    /// Create an account after verifying the emailed OTP
    Register(RegisterArgs),
    /// Sign out and drop cached data
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Exchange the current token for a fresh one
    Refresh,
    /// Browse the catalog
    #[command(subcommand)]
    Products(ProductCommands),
    /// Manage the cart
    #[command(subcommand)]
    Cart(CartCommands),
    /// Manage delivery addresses
    #[command(subcommand)]
    Addresses(AddressCommands),
    /// Place and track orders
    #[command(subcommand)]
    Orders(OrderCommands),
    /// Admin dashboard (admin accounts only)
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,
    /// Account password; not needed with --otp
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// OTP from the login email; omit to have one sent
    #[arg(long)]
    pub otp: Option<String>,
}

#[derive(clap::Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub email: String,
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// OTP from the registration email; omit to have one sent
    #[arg(long)]
    pub otp: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Search and filter products
    List(ProductListArgs),
    /// Show one product
    Get { id: String },
    /// Featured products
    Featured {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List categories
    Categories,
}

#[derive(clap::Args)]
pub struct ProductListArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub per_page: Option<u32>,
}

#[derive(Subcommand)]
pub enum CartCommands {
    /// Show the cart
    Show,
    /// Item count and total
    Summary,
    /// Add a product
    Add {
        product_id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change an item's quantity
    Update { product_id: String, quantity: u32 },
    /// Remove an item
    Remove { product_id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
pub enum AddressCommands {
    /// List saved addresses
    List,
    /// Show the default address
    Default,
    /// Show one address
    Get { id: String },
    /// Save a new address
    Add(AddressArgs),
    /// Delete an address
    Delete { id: String },
    /// Make an address the default
    SetDefault { id: String },
}

#[derive(clap::Args)]
pub struct AddressArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub line1: String,
    #[arg(long)]
    pub line2: Option<String>,
    #[arg(long)]
    pub landmark: Option<String>,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub pincode: String,
    #[arg(long, default_value = "India")]
    pub country: String,
    /// home, work or other
    #[arg(long, default_value = "home")]
    pub address_type: String,
    #[arg(long)]
    pub default: bool,
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Order history
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Show one order
    Get { id: String },
    /// Check out the cart
    Place(PlaceOrderArgs),
    /// Cancel a pending or confirmed order
    Cancel { id: String },
    /// Delivery timeline
    Track { id: String },
}

#[derive(clap::Args)]
pub struct PlaceOrderArgs {
    /// Delivery address id
    #[arg(long)]
    pub address_id: String,
    /// card, upi, net_banking, wallet or cod
    #[arg(long, default_value = "cod")]
    pub payment: String,
    #[arg(long)]
    pub upi_id: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Dashboard counters
    Stats,
    /// All products, including inactive ones
    Products {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show or hide a product
    ToggleProduct { id: String },
    /// Add a product to the catalog
    CreateProduct(CreateProductArgs),
    /// Change a product's details
    UpdateProduct(UpdateProductArgs),
    /// Remove a product from the catalog (soft delete)
    DeleteProduct { id: String },
    /// All orders
    Orders {
        #[arg(long)]
        status: Option<String>,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one order with customer details
    Order { id: String },
    /// Move an order to a new status
    SetOrderStatus {
        id: String,
        status: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// All users
    Users {
        #[arg(short, long)]
        search: Option<String>,
        /// active, inactive or admin
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one user with order stats
    User { id: String },
    /// Reactivate a user, or deactivate with --inactive
    SetUserStatus {
        id: String,
        #[arg(long)]
        inactive: bool,
    },
}

#[derive(clap::Args)]
pub struct CreateProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// Selling price, INR
    #[arg(long)]
    pub price: f64,
    /// Pre-discount price, INR
    #[arg(long)]
    pub original_price: Option<f64>,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub sku: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub stock: u32,
    /// Image URL; repeat for more
    #[arg(long = "image")]
    pub images: Vec<String>,
    #[arg(long)]
    pub thumbnail: Option<String>,
    /// Tag; repeat for more
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub featured: bool,
    /// Create hidden from the storefront
    #[arg(long)]
    pub inactive: bool,
}

#[derive(clap::Args)]
pub struct UpdateProductArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub original_price: Option<f64>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub sku: Option<String>,
    #[arg(long)]
    pub stock: Option<u32>,
    #[arg(long)]
    pub thumbnail: Option<String>,
    #[arg(long)]
    pub featured: Option<bool>,
    #[arg(long)]
    pub active: Option<bool>,
}
