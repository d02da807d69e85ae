use std::collections::HashMap;

use crate::products::Product;

/// Products a browsing session has already seen, keyed by id.
///
/// Grows as listings and details are viewed and is never evicted. Insertion
/// order is kept so [`ProductCache::products`] lists products in the order
/// they were first seen.
#[derive(Debug, Clone, Default)]
pub struct ProductCache {
    order: Vec<String>,
    by_id: HashMap<String, Product>,
}

impl ProductCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `product`, replacing any earlier copy with the same id.
    /// Returns `true` when the id was not cached before.
    pub fn upsert(&mut self, product: Product) -> bool {
        let is_new = !self.by_id.contains_key(&product.id);
        if is_new {
            self.order.push(product.id.clone());
        }
        self.by_id.insert(product.id.clone(), product);
        is_new
    }

    pub fn upsert_all(&mut self, products: impl IntoIterator<Item = Product>) {
        for product in products {
            self.upsert(product);
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cached products in first-seen order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }
}
