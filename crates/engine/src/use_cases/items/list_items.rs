//! List items use case.

use std::sync::Arc;
use warband_domain::{ItemCatalog, ItemDefinition};

/// Exposes the item catalog.
pub struct ListItems {
    catalog: Arc<ItemCatalog>,
}

impl ListItems {
    pub fn new(catalog: Arc<ItemCatalog>) -> Self {
        Self { catalog }
    }

    pub fn execute(&self) -> Vec<ItemDefinition> {
        self.catalog.items().to_vec()
    }
}
