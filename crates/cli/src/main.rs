//! RocketShoes CLI - drive the cart store from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! rocket-shoes show
//!
//! # Add one unit of product 1
//! rocket-shoes add 1
//!
//! # Set product 1 to 3 units
//! rocket-shoes set 1 3
//!
//! # Remove product 1
//! rocket-shoes remove 1
//!
//! # Empty the cart
//! rocket-shoes clear
//! ```
//!
//! Configuration comes from the environment (see `CartConfig`); the cart
//! mirror is persisted under `CART_STORAGE_DIR` so it survives runs.

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's output goes to stdout
#![allow(clippy::print_stdout)]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use rocket_shoes_cart::catalog::HttpCatalog;
use rocket_shoes_cart::config::CartConfig;
use rocket_shoes_cart::models::CartItem;
use rocket_shoes_cart::notify::TracingNotifier;
use rocket_shoes_cart::storage::FileStorage;
use rocket_shoes_cart::store::{CartStore, UpdateProductAmount};
use rocket_shoes_core::ProductId;

#[derive(Parser)]
#[command(name = "rocket-shoes")]
#[command(author, version, about = "RocketShoes cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product id
        product_id: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        product_id: i64,
    },
    /// Set the quantity of a product in the cart
    Set {
        /// Catalog product id
        product_id: i64,
        /// Requested total quantity (0 is a no-op)
        amount: u32,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocket_shoes_cart=info,rocket_shoes_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = CartConfig::from_env().expect("Failed to load configuration");
    let catalog = HttpCatalog::new(&config.catalog).expect("Failed to build catalog client");
    let storage = FileStorage::new(&config.storage_dir);
    let store = CartStore::new(catalog, storage, Arc::new(TracingNotifier), &config.storage_key);
    tracing::debug!(
        storage_key = %config.storage_key,
        catalog = %config.catalog.base_url,
        "cart store initialized"
    );

    let cli = Cli::parse();
    match cli.command {
        Commands::Show => {}
        Commands::Add { product_id } => {
            store.add_product(ProductId::new(product_id)).await;
        }
        Commands::Remove { product_id } => {
            store.remove_product(ProductId::new(product_id));
        }
        Commands::Set { product_id, amount } => {
            store
                .update_product_amount(UpdateProductAmount {
                    product_id: ProductId::new(product_id),
                    amount,
                })
                .await;
        }
        Commands::Clear => {
            store.clear();
        }
    }

    print_cart(&store.cart());
}

/// Render the cart as a simple table with a total line.
fn print_cart(items: &[CartItem]) {
    if items.is_empty() {
        println!("(cart is empty)");
        return;
    }

    for item in items {
        println!(
            "{:>6}  {:<32} {:>10}  x{}",
            item.id,
            item.name,
            item.price.display(),
            item.amount
        );
    }

    let total: Decimal = items.iter().map(CartItem::line_total).sum();
    println!("{:>52}", format!("Total: ${total:.2}"));
}
