//! SolarCart Core Library
//!
//! Client-side shopping cart for the SolarPro storefront, with local
//! persistence and best-effort server synchronization.
//!
//! ## Overview
//!
//! The cart is an ordered list of product lines, one per product id. It is
//! read from a local key-value store at startup and written back after every
//! change. Adding a product also pushes the whole cart to the storefront's
//! `/api/carrinho` endpoint in the background so the server can see a
//! logged-in customer's cart.
//!
//! ## Core Principles
//!
//! - **Local-first**: the local store is the source of truth; the server
//!   copy is informational
//! - **Fails soft**: an unreadable stored cart becomes an empty cart, a
//!   failed push is logged and forgotten
//! - **Render is pure**: badge and panel views are computed from the items,
//!   templating escapes product data
//!
//! ## Quick Start
//!
//! ```ignore
//! use solarcart_core::{format_brl, CartConfig, CartStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CartConfig::new("~/.solarcart/data").with_endpoint("http://localhost:5000");
//!     let mut cart = CartStore::open(&config)?;
//!
//!     cart.add("P1", "Painel Solar 550W", 899.0, "painel.jpg")?;
//!     cart.add("P1", "Painel Solar 550W", 899.0, "painel.jpg")?;
//!
//!     println!("{} items, total {}", cart.item_count(), format_brl(cart.total()));
//!
//!     cart.flush_sync().await;
//!     Ok(())
//! }
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod price;
pub mod render;
pub mod storage;
pub mod sync;
pub mod types;

// Re-exports
pub use cart::{load_cart, merge_by_id, CartStore, CHECKOUT_PATH};
pub use config::{CartConfig, DEFAULT_STORAGE_KEY};
pub use error::{CartError, CartResult};
pub use price::format_brl;
pub use render::{render_badge, render_panel, BadgeView, CartPanelView, CartRowView};
pub use storage::{CartBackend, MemoryStorage, Storage};
pub use sync::{CartEvent, SyncClient, SyncStatus, CART_API_PATH};
pub use types::{CartItem, CartPayload};
