//! Cart events and sync status tracking
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  SyncStatus: state of the background push                       │
//! │  ├── Disabled: no endpoint configured                           │
//! │  ├── Idle: nothing in flight                                    │
//! │  ├── Pushing: pushes in flight                                  │
//! │  └── Error: last push failed with error message                 │
//! │                                                                 │
//! │  CartEvent: notifications for the front end                     │
//! │  ├── BadgeUpdated: item count changed (every mutation)          │
//! │  ├── PanelRendered: panel re-rendered (mutation while open)     │
//! │  ├── ItemAdded: "added to cart" notice                          │
//! │  ├── Synced: server accepted a snapshot                         │
//! │  └── SyncFailed: push failed, local cart unchanged              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};

use crate::render::{BadgeView, CartPanelView};

/// Status of the background push to the storefront
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// No endpoint configured
    Disabled,
    /// Nothing in flight
    #[default]
    Idle,
    /// Pushes currently in flight
    Pushing {
        /// Number of outstanding requests
        in_flight: usize,
    },
    /// The most recent push failed
    Error(String),
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Disabled => write!(f, "Disabled"),
            SyncStatus::Idle => write!(f, "Idle"),
            SyncStatus::Pushing { in_flight } => write!(f, "Pushing ({} in flight)", in_flight),
            SyncStatus::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Events emitted by a [`CartStore`](crate::CartStore)
#[derive(Debug, Clone)]
pub enum CartEvent {
    /// The badge needs to show a new count
    BadgeUpdated(BadgeView),
    /// The open panel was re-rendered
    PanelRendered(CartPanelView),
    /// A product was added (or its quantity bumped by an add)
    ItemAdded {
        /// Product identifier
        id: String,
        /// Quantity of that product after the add
        quantity: u32,
    },
    /// The server accepted a cart snapshot
    Synced {
        /// Number of lines in the snapshot
        items: usize,
        /// When the push completed
        at: DateTime<Utc>,
    },
    /// A push failed; the local cart is unaffected
    SyncFailed {
        /// Error message
        message: String,
    },
}
