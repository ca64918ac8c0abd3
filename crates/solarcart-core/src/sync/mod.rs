//! Best-effort server synchronization
//!
//! The local store is authoritative. Every `add` ships the whole cart to the
//! storefront's `/api/carrinho` endpoint so a logged-in customer's cart is
//! visible server-side (abandoned-cart reports, cart count on page render).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  CartStore::add                                                 │
//! │  ├── persist locally (synchronous, authoritative)               │
//! │  └── spawn push(snapshot) on the tokio runtime                  │
//! │                                                                 │
//! │  SyncClient                                                     │
//! │  ├── push:  POST /api/carrinho  { "produtos": [...] }          │
//! │  └── fetch: GET  /api/carrinho  -> [...]                       │
//! │                                                                 │
//! │  CartEvent: notifications for the front end                     │
//! │  ├── BadgeUpdated / PanelRendered after every mutation          │
//! │  ├── ItemAdded after every add                                  │
//! │  └── Synced / SyncFailed when a push completes                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pushes carry full snapshots, never deltas, so completion order does not
//! matter and nothing is retried.

pub mod client;
pub mod events;

pub use client::{SyncClient, CART_API_PATH};
pub use events::{CartEvent, SyncStatus};
