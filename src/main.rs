use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gomarket_cart::cart::{use_cart, CartItem, CartProvider, CartStore, NewCartItem};
use gomarket_cart::config::CartConfig;
use gomarket_cart::logging::init_tracing;
use gomarket_cart::storage::FileStorage;

#[derive(Parser, Debug)]
#[command(name = "gomarket-cart", version, about = "Inspect and edit the goMarket cart")]
struct Cli {
    /// Config file (default: platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage directory, overrides `storage.data_dir`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cart (default).
    List,
    /// Add a product, or bump its quantity if already in the cart.
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        image_url: String,
        #[arg(long)]
        price: f64,
    },
    /// Increase a product's quantity by one.
    Increment { id: String },
    /// Decrease a product's quantity by one.
    Decrement { id: String },
    /// Drop a product from the cart.
    Remove { id: String },
    /// Empty the cart.
    Clear,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CartConfig::load_from(path),
        None => CartConfig::load(),
    }
    .context("Failed to load config")?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolved_data_dir());
    let storage = FileStorage::open(&data_dir)
        .with_context(|| format!("Failed to open storage at {}", data_dir.display()))?;
    let store = CartStore::from_config(&config, Arc::new(storage)).context("Failed to load cart")?;

    let output = CartProvider::scope(store, || run(cli.command.unwrap_or(Command::List)))?;
    print!("{}", output);
    Ok(())
}

/// Apply `command` to the mounted cart and render the result.
fn run(command: Command) -> Result<String> {
    let cart = use_cart()?;
    match command {
        Command::List => {}
        Command::Add {
            id,
            title,
            image_url,
            price,
        } => cart.add_to_cart(NewCartItem::new(id, title, image_url, price))?,
        Command::Increment { id } => cart.increment(&id)?,
        Command::Decrement { id } => cart.decrement(&id)?,
        Command::Remove { id } => cart.remove(&id)?,
        Command::Clear => cart.clear()?,
    }
    Ok(render(&cart.items()))
}

fn render(items: &[CartItem]) -> String {
    if items.is_empty() {
        return "Cart is empty\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            "{:>4} x {}  {} ({})\n",
            item.quantity, item.id, item.title, item.price
        ));
    }
    out
}
