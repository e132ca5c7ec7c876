use serde::{Deserialize, Serialize};

use warband_domain::{ItemDefinition, ItemEffect};

/// One catalog entry, as returned by ListItems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDto {
    pub name: String,
    pub effect: ItemEffect,
    pub amount: i32,
}

impl From<&ItemDefinition> for ItemDto {
    fn from(item: &ItemDefinition) -> Self {
        Self {
            name: item.name().to_string(),
            effect: item.effect(),
            amount: item.amount(),
        }
    }
}
