use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shopping_cart::modules::cart::adapters::outbound::inventory_http::HttpInventory;
use shopping_cart::modules::cart::core::cart::Cart;
use shopping_cart::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;
use shopping_cart::shared::core::primitives::ProductId;
use shopping_cart::shared::infrastructure::key_value_store::json_file::JsonFileStore;
use shopping_cart::shared::infrastructure::notifier::channel::ChannelNotifier;
use shopping_cart::shell::cart_store::CartStore;
use shopping_cart::shell::config::CartConfig;
use shopping_cart::shell::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "shopping_cart", about = "Manage the persisted shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the cart
    List,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product from the cart
    Remove { product_id: ProductId },
    /// Set the amount of a product
    Update {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = CartConfig::from_env().context("loading configuration")?;

    let inventory = Arc::new(
        HttpInventory::new(config.api_base_url.clone(), config.request_timeout)
            .context("building inventory client")?,
    );
    let store = Arc::new(JsonFileStore::new(&config.store_path));
    let (notifier, mut notifications) = ChannelNotifier::new();

    let cart = CartStore::open(
        inventory.clone(),
        inventory,
        store,
        config.storage_key.clone(),
        Arc::new(notifier),
    )
    .await;

    match cli.command {
        Command::List => {}
        Command::Add { product_id } => cart.add_product(product_id).await,
        Command::Remove { product_id } => cart.remove_product(product_id).await,
        Command::Update { product_id, amount } => {
            cart.update_product_amount(UpdateProductAmount { product_id, amount })
                .await;
        }
    }

    while let Ok(notification) = notifications.try_recv() {
        eprintln!("{notification}");
    }
    print_cart(&cart.cart());
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for entry in cart {
        println!(
            "{:>6}  {:<40} x{:<4} {:>10.2}",
            entry.product_id(),
            entry.product.title,
            entry.amount,
            entry.line_total()
        );
    }
    println!(
        "{} products, {} units, subtotal {:.2}",
        cart.len(),
        cart.total_units(),
        cart.subtotal()
    );
}
