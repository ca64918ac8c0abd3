//! The cart store.
//!
//! `CartStore` owns the ordered list of cart lines. Every mutation rewrites
//! the persisted copy, refreshes the badge, re-renders the panel when it is
//! open, and (for `add`) kicks off a background push of the whole cart.
//!
//! # Example
//!
//! ```ignore
//! use solarcart_core::{CartConfig, CartStore};
//!
//! let config = CartConfig::new("~/.solarcart/data").with_endpoint("https://loja.example");
//! let mut cart = CartStore::open(&config)?;
//! cart.add("P1", "Painel Solar 550W", 899.0, "painel.jpg")?;
//! println!("{} items, {}", cart.item_count(), solarcart_core::format_brl(cart.total()));
//! cart.flush_sync().await;
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::CartConfig;
use crate::error::{CartError, CartResult};
use crate::render::{self, BadgeView, CartPanelView};
use crate::storage::{CartBackend, Storage};
use crate::sync::{CartEvent, SyncClient, SyncStatus};
use crate::types::CartItem;

/// Where the storefront sends customers to pay
pub const CHECKOUT_PATH: &str = "/checkout";

/// Read the persisted cart stored under `key`.
///
/// Never fails: a missing key, a storage error or content that does not
/// parse all yield an empty cart. Duplicate ids in stored data are merged.
pub fn load_cart(backend: &dyn CartBackend, key: &str) -> Vec<CartItem> {
    let raw = match backend.read_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, key, "failed to read stored cart, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<CartItem>>(&raw) {
        Ok(items) => merge_by_id(items),
        Err(e) => {
            warn!(error = %e, key, "stored cart is malformed, starting empty");
            Vec::new()
        }
    }
}

/// Prices must survive a write/read cycle of the stored cart, which rejects
/// negative and non-finite values.
fn check_price(price: f64) -> CartResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(CartError::InvalidPrice(price));
    }
    Ok(())
}

/// Collapse lines sharing an id into the first occurrence, summing
/// quantities. Order of first occurrences is kept.
pub fn merge_by_id(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => merged.push(item),
        }
    }
    merged
}

/// Client-side shopping cart with local persistence and best-effort sync.
pub struct CartStore {
    /// Local key-value store holding the serialized cart
    backend: Arc<dyn CartBackend>,
    /// Key the cart is stored under
    storage_key: String,
    /// Cart lines in insertion order
    items: Vec<CartItem>,
    /// Whether mutations re-render the panel
    panel_open: bool,
    /// Remote endpoint client (None disables sync)
    sync: Option<SyncClient>,
    /// Background pushes not yet reaped
    pending: JoinSet<()>,
    /// Number of pushes still running
    in_flight: Arc<AtomicUsize>,
    /// Message of the most recent failed push, cleared by a success
    last_sync_error: Arc<Mutex<Option<String>>>,
    /// Event broadcast channel for the front end
    event_tx: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Open the cart stored under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Io` if the directory cannot be created,
    /// `CartError::Database` if the database cannot be opened and
    /// `CartError::Config` if the endpoint is not a valid URL. A stored cart
    /// that cannot be parsed is not an error.
    pub fn open(config: &CartConfig) -> CartResult<Self> {
        info!(data_dir = ?config.data_dir, "Opening cart store");

        std::fs::create_dir_all(&config.data_dir)?;
        let storage = Storage::new(config.database_path())?;

        Self::with_backend(storage, config)
    }

    /// Build a store over an arbitrary backend.
    pub fn with_backend(
        backend: impl CartBackend + 'static,
        config: &CartConfig,
    ) -> CartResult<Self> {
        let backend: Arc<dyn CartBackend> = Arc::new(backend);
        let sync = SyncClient::from_config(config)?;
        let items = load_cart(backend.as_ref(), &config.storage_key);
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));

        info!(
            items = items.len(),
            sync_enabled = sync.is_some(),
            "Cart loaded"
        );

        Ok(Self {
            backend,
            storage_key: config.storage_key.clone(),
            items,
            panel_open: false,
            sync,
            pending: JoinSet::new(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            last_sync_error: Arc::new(Mutex::new(None)),
            event_tx,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    /// Cart lines in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price times quantity over all lines
    pub fn total(&self) -> f64 {
        render::cart_total(&self.items)
    }

    /// Sum of quantities over all lines (the badge number)
    pub fn item_count(&self) -> u64 {
        render::cart_item_count(&self.items)
    }

    pub fn badge(&self) -> BadgeView {
        render::render_badge(&self.items)
    }

    pub fn panel(&self) -> CartPanelView {
        render::render_panel(&self.items)
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// The remote endpoint client, if sync is configured
    pub fn sync_client(&self) -> Option<&SyncClient> {
        self.sync.as_ref()
    }

    pub fn sync_status(&self) -> SyncStatus {
        if self.sync.is_none() {
            return SyncStatus::Disabled;
        }
        let in_flight = self.in_flight.load(Ordering::SeqCst);
        if in_flight > 0 {
            return SyncStatus::Pushing { in_flight };
        }
        match self.last_sync_error.lock().clone() {
            Some(message) => SyncStatus::Error(message),
            None => SyncStatus::Idle,
        }
    }

    /// Subscribe to cart events
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.event_tx.subscribe()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mutations
    // ═══════════════════════════════════════════════════════════════════════

    /// Re-read the persisted cart, discarding the in-memory copy.
    pub fn reload(&mut self) {
        self.items = load_cart(self.backend.as_ref(), &self.storage_key);
        self.refresh();
    }

    /// Add one unit of a product.
    ///
    /// An id already in the cart gets its quantity bumped; a new id is
    /// appended with quantity 1. The whole cart is then pushed to the server
    /// in the background; the outcome of that push never affects the return
    /// value.
    ///
    /// # Errors
    ///
    /// `CartError::InvalidPrice` for a negative or non-finite price, and any
    /// storage error from writing the cart. The cart is unchanged on error.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> CartResult<()> {
        check_price(price)?;
        let id = id.into();

        let mut next = self.items.clone();
        let quantity = match next.iter_mut().find(|item| item.id == id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1);
                existing.quantity
            }
            None => {
                next.push(CartItem::new(id.clone(), name, price, image));
                1
            }
        };

        self.commit(next)?;
        debug!(%id, quantity, "Added to cart");
        self.spawn_sync();

        let _ = self.event_tx.send(CartEvent::ItemAdded { id, quantity });
        Ok(())
    }

    /// Add one unit to the line at `index`.
    pub fn increase(&mut self, index: usize) -> CartResult<()> {
        self.check_index(index)?;
        let mut next = self.items.clone();
        next[index].quantity = next[index].quantity.saturating_add(1);
        let quantity = next[index].quantity;

        self.commit(next)?;
        debug!(index, quantity, "Increased quantity");
        Ok(())
    }

    /// Take one unit from the line at `index`, removing the line when it
    /// held a single unit.
    pub fn decrease(&mut self, index: usize) -> CartResult<()> {
        self.check_index(index)?;
        if self.items[index].quantity <= 1 {
            return self.remove(index);
        }
        let mut next = self.items.clone();
        next[index].quantity -= 1;
        let quantity = next[index].quantity;

        self.commit(next)?;
        debug!(index, quantity, "Decreased quantity");
        Ok(())
    }

    /// Remove the line at `index`; later lines shift left.
    pub fn remove(&mut self, index: usize) -> CartResult<()> {
        self.check_index(index)?;
        let mut next = self.items.clone();
        let removed = next.remove(index);

        self.commit(next)?;
        debug!(index, id = %removed.id, "Removed from cart");
        Ok(())
    }

    /// Empty the cart (after a completed checkout).
    pub fn clear(&mut self) -> CartResult<()> {
        self.commit(Vec::new())?;
        debug!("Cleared cart");
        Ok(())
    }

    /// Adopt a whole cart, e.g. the one the server holds. Lines sharing an
    /// id are merged.
    ///
    /// # Errors
    ///
    /// `CartError::InvalidPrice` if any line has a negative or non-finite
    /// price; the cart is left as it was.
    pub fn replace(&mut self, items: Vec<CartItem>) -> CartResult<()> {
        for item in &items {
            check_price(item.price)?;
        }
        self.commit(merge_by_id(items))?;
        debug!(items = self.items.len(), "Replaced cart");
        Ok(())
    }

    /// Path to continue to checkout.
    ///
    /// # Errors
    ///
    /// `CartError::EmptyCart` when there is nothing to buy.
    pub fn begin_checkout(&self) -> CartResult<&'static str> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(CHECKOUT_PATH)
    }

    /// Show the panel; it is re-rendered after every mutation until closed.
    pub fn open_panel(&mut self) -> CartPanelView {
        self.panel_open = true;
        let view = self.panel();
        let _ = self.event_tx.send(CartEvent::PanelRendered(view.clone()));
        view
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Wait for every background push started so far.
    ///
    /// Only needed by short-lived processes that would otherwise exit before
    /// the push is sent.
    pub async fn flush_sync(&mut self) {
        while let Some(result) = self.pending.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "Cart sync task did not complete");
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Internals
    // ═══════════════════════════════════════════════════════════════════════

    fn check_index(&self, index: usize) -> CartResult<()> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    /// Write `next` to storage, then make it the current cart.
    ///
    /// Memory is only touched after the write succeeds, so a failed write
    /// leaves both copies as they were.
    fn commit(&mut self, next: Vec<CartItem>) -> CartResult<()> {
        let data = serde_json::to_vec(&next)?;
        self.backend.write_raw(&self.storage_key, &data)?;
        self.items = next;
        self.refresh();
        Ok(())
    }

    fn refresh(&self) {
        let _ = self.event_tx.send(CartEvent::BadgeUpdated(self.badge()));
        if self.panel_open {
            let _ = self.event_tx.send(CartEvent::PanelRendered(self.panel()));
        }
    }

    /// Push a snapshot of the cart without waiting for the result.
    fn spawn_sync(&mut self) {
        let Some(client) = self.sync.clone() else {
            debug!("Sync disabled, skipping push");
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No async runtime, skipping push");
            return;
        };

        // Reap pushes that already finished
        while self.pending.try_join_next().is_some() {}

        let snapshot = self.items.clone();
        let in_flight = self.in_flight.clone();
        let last_error = self.last_sync_error.clone();
        let event_tx = self.event_tx.clone();

        in_flight.fetch_add(1, Ordering::SeqCst);
        self.pending.spawn_on(
            async move {
                let result = client.push(&snapshot).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);

                match result {
                    Ok(()) => {
                        debug!(items = snapshot.len(), "Cart synced");
                        *last_error.lock() = None;
                        let _ = event_tx.send(CartEvent::Synced {
                            items: snapshot.len(),
                            at: chrono::Utc::now(),
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to sync cart");
                        *last_error.lock() = Some(e.to_string());
                        let _ = event_tx.send(CartEvent::SyncFailed {
                            message: e.to_string(),
                        });
                    }
                }
            },
            &handle,
        );
    }
}
