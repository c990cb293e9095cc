//! Terminal stand-in for page navigation.
//!
//! Each command is treated as a page; "redirecting" to the login page means
//! telling the user how to sign in again.

use storefront_client::Navigator;

use crate::cli::{AdminCommands, Commands};

impl Commands {
    /// The storefront page this command corresponds to.
    pub fn page(&self) -> &'static str {
        match self {
            Commands::Login(_) => "/login",
            Commands::Register(_) => "/register",
            Commands::Logout | Commands::Whoami | Commands::Refresh => "/account",
            Commands::Products(_) => "/products",
            Commands::Cart(_) => "/cart",
            Commands::Addresses(_) => "/account/addresses",
            Commands::Orders(_) => "/orders",
            Commands::Admin(AdminCommands::Stats) => "/admin",
            Commands::Admin(_) => "/admin/manage",
        }
    }
}

pub struct TerminalNavigator {
    page: &'static str,
}

impl TerminalNavigator {
    pub fn new(page: &'static str) -> Self {
        Self { page }
    }
}

impl Navigator for TerminalNavigator {
    fn current_path(&self) -> String {
        self.page.to_string()
    }

    fn redirect_to(&self, path: &str) {
        eprintln!("Your session has expired. Sign in again with `storefront login` ({path}).");
    }
}
