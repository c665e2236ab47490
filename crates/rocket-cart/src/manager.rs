//! # Cart Manager
//!
//! Owns the authoritative cart and implements the three mutating operations.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product(id)                                                        │
//! │    stock(id) ──✗──► Failed(AddFailed)                                   │
//! │       │                                                                 │
//! │       ├── in cart, amount+1 > stock ──► Rejected(StockExceeded)         │
//! │       ├── in cart ─────────────────────► with_amount(id, amount+1)      │
//! │       ├── not in cart, stock == 0 ────► Unchanged                       │
//! │       └── not in cart ──► product(id) ──✗──► Failed(AddFailed)          │
//! │                                  └──────────► with_line(new, amount 1)  │
//! │                                                                         │
//! │  remove_product(id)                                                     │
//! │       ├── absent ──► Rejected(RemoveFailed)                             │
//! │       └── present ─► without(id)                                        │
//! │                                                                         │
//! │  update_product_amount(id, n)                                           │
//! │       ├── n ≤ 1 ──► Unchanged (no stock query)                          │
//! │       ├── stock(id) ──✗──► Failed(UpdateFailed)                         │
//! │       ├── n > stock ──► Rejected(StockExceeded)                         │
//! │       └── with_amount(id, n)   (unmatched id: same cart, still saved)  │
//! │                                                                         │
//! │  COMMIT: store.save(next) ──✗──► Failed(op notice), cart untouched      │
//! │                 └── ok ──► cart = next ──► Committed                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is written before the in-memory cart is replaced, so the two
//! never disagree after a call returns.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use rocket_core::validation::{validate_cart, validate_stock_bound};
use rocket_core::{Cart, CartError, CartSummary, Notice, Outcome, Product, ProductId};

use crate::ports::{CatalogQuery, NotificationSink, PersistentStore, StockQuery};

/// Explicit cart state holder.
///
/// Methods take `&mut self`, so one manager processes one operation at a
/// time. Share it across tasks with [`CartManager::spawn`].
pub struct CartManager {
    cart: Cart,
    stock: Arc<dyn StockQuery>,
    catalog: Arc<dyn CatalogQuery>,
    store: Arc<dyn PersistentStore>,
    notifier: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartManager {
    /// Creates a manager and restores the cart from `store`.
    ///
    /// A missing, unreadable or inconsistent snapshot yields an empty cart.
    pub async fn load(
        stock: Arc<dyn StockQuery>,
        catalog: Arc<dyn CatalogQuery>,
        store: Arc<dyn PersistentStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let cart = restore(store.as_ref()).await;
        info!(lines = cart.len(), "Cart manager ready");

        CartManager {
            cart,
            stock,
            catalog,
            store,
            notifier,
        }
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Derived totals for the current cart.
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product, appending a new line if needed.
    pub async fn add_product(&mut self, product_id: ProductId) -> Outcome {
        debug!(product_id = %product_id, "Adding product");

        let stock = match self.stock.get_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => return self.fail(Notice::AddFailed, e.into()),
        };

        if let Some(line) = self.cart.get(product_id) {
            // A line already at the stock level cannot grow, even at u32::MAX
            let requested = match line.amount.checked_add(1) {
                Some(requested) if line.amount < stock.amount => requested,
                _ => {
                    let e = CartError::StockExceeded {
                        product_id,
                        available: stock.amount,
                        requested: line.amount.saturating_add(1),
                    };
                    return self.reject(Notice::StockExceeded, e);
                }
            };

            let next = self.cart.with_amount(product_id, requested);
            return self.commit(next, Notice::AddFailed).await;
        }

        if stock.is_sold_out() {
            debug!(product_id = %product_id, "Product sold out, nothing added");
            return Outcome::Unchanged;
        }

        let details = match self.catalog.get_product(product_id).await {
            Ok(details) => details,
            Err(e) => return self.fail(Notice::AddFailed, e.into()),
        };

        let next = self.cart.with_line(Product::new(product_id, details));
        self.commit(next, Notice::AddFailed).await
    }

    /// Removes a product's line.
    pub async fn remove_product(&mut self, product_id: ProductId) -> Outcome {
        debug!(product_id = %product_id, "Removing product");

        if !self.cart.contains(product_id) {
            return self.reject(Notice::RemoveFailed, CartError::ProductNotInCart(product_id));
        }

        let next = self.cart.without(product_id);
        self.commit(next, Notice::RemoveFailed).await
    }

    /// Sets a line's quantity, bounded by current stock.
    ///
    /// Amounts of 0 or 1 are ignored; removing a line goes through
    /// [`CartManager::remove_product`].
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: u32) -> Outcome {
        debug!(product_id = %product_id, amount, "Updating product amount");

        if amount <= 1 {
            debug!(product_id = %product_id, amount, "Amount at or below 1, ignored");
            return Outcome::Unchanged;
        }

        let stock = match self.stock.get_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => return self.fail(Notice::UpdateFailed, e.into()),
        };

        if let Err(e) = validate_stock_bound(&stock, amount) {
            return self.reject(Notice::StockExceeded, e);
        }

        if !self.cart.contains(product_id) {
            debug!(product_id = %product_id, "Product not in cart, saving cart as is");
        }

        let next = self.cart.with_amount(product_id, amount);
        self.commit(next, Notice::UpdateFailed).await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn commit(&mut self, next: Cart, on_failure: Notice) -> Outcome {
        if let Err(e) = self.store.save(&next).await {
            return self.fail(on_failure, CartError::Store(e.to_string()));
        }

        self.cart = next;
        info!(
            lines = self.cart.len(),
            units = self.cart.total_amount(),
            "Cart committed"
        );
        Outcome::Committed
    }

    fn reject(&self, notice: Notice, cause: CartError) -> Outcome {
        warn!(error = %cause, notice = %notice, "Cart operation rejected");
        self.notifier.notify_error(notice.message());
        Outcome::Rejected(notice)
    }

    fn fail(&self, notice: Notice, cause: CartError) -> Outcome {
        error!(error = %cause, notice = %notice, "Cart operation failed");
        self.notifier.notify_error(notice.message());
        Outcome::Failed(notice)
    }
}

async fn restore(store: &dyn PersistentStore) -> Cart {
    let cart = match store.load().await {
        Ok(Some(cart)) => cart,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(error = %e, "Stored cart unreadable, starting empty");
            return Cart::new();
        }
    };

    match validate_cart(&cart) {
        Ok(()) => cart,
        Err(e) => {
            warn!(error = %e, "Stored cart inconsistent, starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
