//! SolarCart CLI
//!
//! Thin wrapper around solarcart-core for command-line usage. Each
//! invocation is one user action on the cart.
//!
//! ## Usage
//!
//! ```bash
//! # Show the cart
//! solarcart show
//!
//! # Add a product (id, name, unit price, image file)
//! solarcart add P1 "Painel Solar 550W" 899.90 painel.jpg
//!
//! # Change quantities by line index
//! solarcart increase 0
//! solarcart decrease 0
//! solarcart remove 0
//!
//! # Totals
//! solarcart total
//! solarcart count
//!
//! # Render the cart panel as HTML
//! solarcart render
//!
//! # Sync with the storefront
//! solarcart --endpoint http://localhost:5000 add P1 "Painel" 899.90 painel.jpg
//! solarcart --endpoint http://localhost:5000 pull --adopt
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use solarcart_core::{format_brl, CartConfig, CartStore, SyncStatus};

/// SolarCart - storefront shopping cart
#[derive(Parser)]
#[command(name = "solarcart")]
#[command(version = "0.1.0")]
#[command(about = "SolarCart - storefront shopping cart")]
#[command(
    long_about = "Local-first shopping cart for the SolarPro storefront. The cart is kept on disk and pushed to the storefront on every add when an endpoint is configured."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: ~/.solarcart/data)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storefront base URL for cart sync (default: $SOLARCART_ENDPOINT)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Sync request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cart lines, badge and total
    Show,

    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,
        /// Product name
        name: String,
        /// Unit price (e.g. 899.90)
        price: f64,
        /// Image file name
        image: String,
    },

    /// Add one unit to the line at INDEX
    Increase {
        /// Line index (as shown by `show`)
        index: usize,
    },

    /// Take one unit from the line at INDEX (removes it at zero)
    Decrease {
        /// Line index (as shown by `show`)
        index: usize,
    },

    /// Remove the line at INDEX
    Remove {
        /// Line index (as shown by `show`)
        index: usize,
    },

    /// Print the formatted cart total
    Total,

    /// Print the number of units in the cart
    Count,

    /// Empty the cart
    Clear,

    /// Print the cart panel as HTML
    Render,

    /// Continue to checkout
    Checkout,

    /// Fetch the cart held by the storefront
    Pull {
        /// Replace the local cart with the remote one
        #[arg(long)]
        adopt: bool,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory (~/.solarcart/data)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".solarcart")
        .join("data")
}

fn build_config(cli: &Cli) -> CartConfig {
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let mut config = CartConfig::from_env(data_dir);
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    config
}

fn print_cart(cart: &CartStore) {
    if cart.is_empty() {
        println!("Cart is empty");
    } else {
        println!("Cart ({} lines):", cart.len());
        for (index, item) in cart.items().iter().enumerate() {
            println!(
                "  [{}] {} x{} @ {} = {}",
                index,
                item.name,
                item.quantity,
                format_brl(item.price),
                format_brl(item.subtotal())
            );
            println!("      ID: {}", item.id);
        }
    }
    println!();
    println!("Items: {}", cart.item_count());
    println!("Total: {}", format_brl(cart.total()));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = build_config(&cli);
    tracing::debug!(?config, "Resolved configuration");
    let mut cart = CartStore::open(&config)?;

    match cli.command {
        Commands::Show => {
            print_cart(&cart);
            if cart.sync_status() != SyncStatus::Disabled {
                println!("Sync: {}", cart.sync_status());
            }
        }
        Commands::Add {
            id,
            name,
            price,
            image,
        } => {
            cart.add(id, name, price, image)?;
            println!("Produto adicionado ao carrinho!");
            println!("Items: {}", cart.item_count());

            cart.flush_sync().await;
            if let SyncStatus::Error(message) = cart.sync_status() {
                eprintln!("Warning: cart not synced with storefront: {}", message);
            }
        }
        Commands::Increase { index } => {
            cart.increase(index)?;
            print_cart(&cart);
        }
        Commands::Decrease { index } => {
            cart.decrease(index)?;
            print_cart(&cart);
        }
        Commands::Remove { index } => {
            cart.remove(index)?;
            print_cart(&cart);
        }
        Commands::Total => {
            println!("{}", format_brl(cart.total()));
        }
        Commands::Count => {
            println!("{}", cart.item_count());
        }
        Commands::Clear => {
            cart.clear()?;
            println!("Cart cleared");
        }
        Commands::Render => {
            let panel = cart.open_panel();
            println!("{}", panel.to_html());
            println!("<div id=\"cartTotal\">{}</div>", panel.total);
        }
        Commands::Checkout => match cart.begin_checkout() {
            Ok(path) => println!("Proceed to {}", path),
            Err(solarcart_core::CartError::EmptyCart) => {
                anyhow::bail!("Seu carrinho está vazio!");
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Pull { adopt } => {
            let Some(client) = cart.sync_client().cloned() else {
                anyhow::bail!("No endpoint configured (use --endpoint or SOLARCART_ENDPOINT)");
            };
            let remote = client.fetch().await?;
            println!("Remote cart: {} lines", remote.len());
            for item in &remote {
                println!("  {} x{} @ {}", item.name, item.quantity, format_brl(item.price));
            }
            if adopt {
                cart.replace(remote)?;
                println!("Local cart replaced");
            }
        }
    }

    Ok(())
}
