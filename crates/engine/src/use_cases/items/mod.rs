//! Item use cases.

mod error;
mod list_items;
mod pickup_item;

use std::sync::Arc;

pub use error::ItemError;
pub use list_items::ListItems;
pub use pickup_item::PickupItem;

/// Container for item use cases.
pub struct ItemUseCases {
    pub pickup: Arc<PickupItem>,
    pub list: Arc<ListItems>,
}

impl ItemUseCases {
    pub fn new(pickup: Arc<PickupItem>, list: Arc<ListItems>) -> Self {
        Self { pickup, list }
    }
}
