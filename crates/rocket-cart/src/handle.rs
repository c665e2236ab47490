//! # Cart Handle
//!
//! Runs a [`CartManager`] on its own task so any number of callers can share
//! one cart without lost updates.
//!
//! ## Message Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartHandle (Clone)             Cart task (single owner)                │
//! │  ──────────────────             ─────────────────────────               │
//! │                                                                         │
//! │  add_product(1) ──┐                                                     │
//! │  add_product(1) ──┼── mpsc ──►  recv ──► manager.add_product(1)         │
//! │  remove(2) ───────┘     │                     │                         │
//! │                         │                     ▼  Committed?             │
//! │                         │               watch::send(cart) ──► subscribers
//! │        ◄──── oneshot ───┴─────────────── Outcome                        │
//! │                                                                         │
//! │  Commands run to completion one at a time, so each sees the cart the   │
//! │  previous one committed.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use rocket_core::{Cart, CartError, CartResult, CartSummary, Outcome, ProductId};

use crate::manager::CartManager;

/// Requests processed by the cart task.
#[derive(Debug)]
enum CartCommand {
    AddProduct {
        product_id: ProductId,
        reply: oneshot::Sender<Outcome>,
    },
    RemoveProduct {
        product_id: ProductId,
        reply: oneshot::Sender<Outcome>,
    },
    UpdateProductAmount {
        product_id: ProductId,
        amount: u32,
        reply: oneshot::Sender<Outcome>,
    },
    Snapshot {
        reply: oneshot::Sender<Cart>,
    },
}

/// Cheap, cloneable access to a running cart task.
#[derive(Debug, Clone)]
pub struct CartHandle {
    commands: mpsc::Sender<CartCommand>,
    shutdown_tx: mpsc::Sender<oneshot::Sender<()>>,
    updates: watch::Receiver<Cart>,
}

impl CartHandle {
    /// Adds one unit of a product.
    pub async fn add_product(&self, product_id: ProductId) -> CartResult<Outcome> {
        self.request(|reply| CartCommand::AddProduct { product_id, reply })
            .await
    }

    /// Removes a product's line.
    pub async fn remove_product(&self, product_id: ProductId) -> CartResult<Outcome> {
        self.request(|reply| CartCommand::RemoveProduct { product_id, reply })
            .await
    }

    /// Sets a line's quantity.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: u32,
    ) -> CartResult<Outcome> {
        self.request(|reply| CartCommand::UpdateProductAmount {
            product_id,
            amount,
            reply,
        })
        .await
    }

    /// The cart as of every command queued before this call.
    pub async fn cart(&self) -> CartResult<Cart> {
        self.request(|reply| CartCommand::Snapshot { reply }).await
    }

    /// Totals for [`CartHandle::cart`].
    pub async fn summary(&self) -> CartResult<CartSummary> {
        Ok(self.cart().await?.summary())
    }

    /// A receiver that sees the cart after every commit.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.updates.clone()
    }

    /// Stops the task once the command in progress has finished. Commands
    /// still queued are dropped and their callers get
    /// [`CartError::ManagerStopped`].
    pub async fn shutdown(&self) -> CartResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.shutdown_tx
            .send(ack_tx)
            .await
            .map_err(|_| CartError::ManagerStopped)?;
        ack_rx.await.map_err(|_| CartError::ManagerStopped)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> CartCommand,
    ) -> CartResult<T> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| CartError::ManagerStopped)?;
        rx.await.map_err(|_| CartError::ManagerStopped)
    }
}

// =============================================================================
// Cart Task
// =============================================================================

struct CartTask {
    manager: CartManager,
    commands: mpsc::Receiver<CartCommand>,
    shutdown_rx: mpsc::Receiver<oneshot::Sender<()>>,
    updates: watch::Sender<Cart>,
}

impl CartManager {
    /// Moves the manager onto a new task and returns a handle to it.
    ///
    /// `capacity` bounds how many commands may queue before callers wait;
    /// zero is treated as one.
    pub fn spawn(self, capacity: usize) -> CartHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(capacity.max(1));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let (updates_tx, updates_rx) = watch::channel(self.cart().clone());

        let task = CartTask {
            manager: self,
            commands: cmd_rx,
            shutdown_rx,
            updates: updates_tx,
        };
        tokio::spawn(task.run());

        CartHandle {
            commands: cmd_tx,
            shutdown_tx,
            updates: updates_rx,
        }
    }
}

impl CartTask {
    async fn run(mut self) {
        info!("Cart task starting");

        loop {
            tokio::select! {
                // Shutdown wins over queued commands
                biased;

                Some(ack) = self.shutdown_rx.recv() => {
                    info!("Cart task shutting down");
                    let _ = ack.send(());
                    break;
                }

                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => {
                        debug!("All cart handles dropped");
                        break;
                    }
                },
            }
        }

        info!("Cart task stopped");
    }

    async fn handle(&mut self, command: CartCommand) {
        match command {
            CartCommand::AddProduct { product_id, reply } => {
                let outcome = self.manager.add_product(product_id).await;
                self.finish(outcome, reply);
            }
            CartCommand::RemoveProduct { product_id, reply } => {
                let outcome = self.manager.remove_product(product_id).await;
                self.finish(outcome, reply);
            }
            CartCommand::UpdateProductAmount {
                product_id,
                amount,
                reply,
            } => {
                let outcome = self.manager.update_product_amount(product_id, amount).await;
                self.finish(outcome, reply);
            }
            CartCommand::Snapshot { reply } => {
                // Nothing to undo if the caller stopped waiting
                let _ = reply.send(self.manager.cart().clone());
            }
        }
    }

    fn finish(&self, outcome: Outcome, reply: oneshot::Sender<Outcome>) {
        if outcome.is_committed() {
            self.updates.send_replace(self.manager.cart().clone());
        }
        // The caller may have given up waiting; the commit stands regardless
        let _ = reply.send(outcome);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoOpNotifier;
    use crate::store::MemoryStore;
    use crate::testing::FakeApi;
    use rocket_core::Notice;
    use std::sync::Arc;

    async fn spawn_with(api: FakeApi) -> (CartHandle, Arc<MemoryStore>) {
        let api = Arc::new(api);
        let store = Arc::new(MemoryStore::new());
        let manager =
            CartManager::load(api.clone(), api, store.clone(), Arc::new(NoOpNotifier)).await;
        (manager.spawn(8), store)
    }

    #[tokio::test]
    async fn test_operations_through_handle() {
        let (handle, store) = spawn_with(FakeApi::new().with_product(1, 5)).await;

        assert_eq!(handle.add_product(ProductId::new(1)).await.unwrap(), Outcome::Committed);
        assert_eq!(
            handle.update_product_amount(ProductId::new(1), 4).await.unwrap(),
            Outcome::Committed
        );
        assert_eq!(
            handle.update_product_amount(ProductId::new(1), 9).await.unwrap(),
            Outcome::Rejected(Notice::StockExceeded)
        );

        let summary = handle.summary().await.unwrap();
        assert_eq!(summary.line_count, 1);
        assert_eq!(summary.total_amount, 4);

        assert_eq!(
            handle.remove_product(ProductId::new(1)).await.unwrap(),
            Outcome::Committed
        );
        assert!(handle.cart().await.unwrap().is_empty());
        assert_eq!(store.raw().await.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let (handle, store) = spawn_with(FakeApi::new().with_product(1, 100)).await;

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                handle.add_product(ProductId::new(1)).await
            }));
        }
        for task in tasks {
            assert!(task.await.unwrap().unwrap().is_committed());
        }

        let cart = handle.cart().await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).map(|p| p.amount), Some(20));

        let stored: Cart = serde_json::from_str(&store.raw().await.unwrap()).unwrap();
        assert_eq!(stored, cart);
    }

    #[tokio::test]
    async fn test_concurrent_adds_stop_at_stock() {
        let (handle, _store) = spawn_with(FakeApi::new().with_product(1, 3)).await;

        let results = tokio::join!(
            handle.add_product(ProductId::new(1)),
            handle.add_product(ProductId::new(1)),
            handle.add_product(ProductId::new(1)),
            handle.add_product(ProductId::new(1)),
            handle.add_product(ProductId::new(1)),
        );
        let outcomes = [results.0, results.1, results.2, results.3, results.4];

        let committed = outcomes
            .iter()
            .filter(|o| matches!(o, Ok(Outcome::Committed)))
            .count();
        assert_eq!(committed, 3);

        let cart = handle.cart().await.unwrap();
        assert_eq!(cart.get(ProductId::new(1)).map(|p| p.amount), Some(3));
    }

    #[tokio::test]
    async fn test_subscribers_see_commits() {
        let (handle, _store) = spawn_with(FakeApi::new().with_product(2, 5)).await;
        let mut updates = handle.subscribe();
        assert!(updates.borrow_and_update().is_empty());

        handle.add_product(ProductId::new(2)).await.unwrap();

        updates.changed().await.unwrap();
        assert_eq!(
            updates.borrow_and_update().get(ProductId::new(2)).map(|p| p.amount),
            Some(1)
        );

        // Rejections publish nothing
        handle.remove_product(ProductId::new(7)).await.unwrap();
        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_shutdown_stops_the_task() {
        let (handle, _store) = spawn_with(FakeApi::new().with_product(1, 5)).await;
        handle.add_product(ProductId::new(1)).await.unwrap();

        handle.shutdown().await.unwrap();

        assert!(matches!(
            handle.add_product(ProductId::new(1)).await,
            Err(CartError::ManagerStopped)
        ));
        assert!(matches!(handle.cart().await, Err(CartError::ManagerStopped)));
        assert!(matches!(handle.shutdown().await, Err(CartError::ManagerStopped)));
    }
}
