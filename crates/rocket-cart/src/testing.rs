//! In-memory stock and catalog for tests where the stock level changes
//! between calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use rocket_core::{LookupError, ProductDetails, ProductId, StockInfo};

use crate::ports::{CatalogQuery, StockQuery};

/// Display fields for fixture product `id`.
pub(crate) fn details(id: u64) -> ProductDetails {
    ProductDetails::default()
        .with("title", format!("Tênis {}", id))
        .with("price", 100.0 + id as f64)
        .with("image", format!("https://cdn.example.com/tenis{}.jpg", id))
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    stock: Mutex<HashMap<ProductId, u32>>,
    products: Mutex<HashMap<ProductId, ProductDetails>>,
    catalog_calls: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Product known to both stock and catalog.
    pub(crate) fn with_product(self, id: u64, stock: u32) -> Self {
        self.products
            .lock()
            .unwrap()
            .insert(ProductId::new(id), details(id));
        self.with_stock(id, stock)
    }

    /// Stock record only; the catalog answers NotFound.
    pub(crate) fn with_stock(self, id: u64, stock: u32) -> Self {
        self.set_stock(id, stock);
        self
    }

    pub(crate) fn set_stock(&self, id: u64, stock: u32) {
        self.stock.lock().unwrap().insert(ProductId::new(id), stock);
    }

    pub(crate) fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StockQuery for FakeApi {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, LookupError> {
        self.stock
            .lock()
            .unwrap()
            .get(&product_id)
            .map(|&amount| StockInfo {
                id: product_id,
                amount,
            })
            .ok_or_else(|| LookupError::not_found("stock", product_id))
    }
}

#[async_trait]
impl CatalogQuery for FakeApi {
    async fn get_product(&self, product_id: ProductId) -> Result<ProductDetails, LookupError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.products
            .lock()
            .unwrap()
            .get(&product_id)
            .cloned()
            .ok_or_else(|| LookupError::not_found("products", product_id))
    }
}
