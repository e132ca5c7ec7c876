//! Item catalog value objects.
//!
//! The catalog is read-only: applying an item never changes its entry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// What an item does to the unit that picks it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemEffect {
    Health,
    Experience,
}

impl ItemEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Experience => "experience",
        }
    }
}

impl fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    name: String,
    effect: ItemEffect,
    amount: i32,
}

impl ItemDefinition {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is blank or the amount
    /// is not positive.
    pub fn new(name: impl Into<String>, effect: ItemEffect, amount: i32) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Item name cannot be empty"));
        }
        if amount <= 0 {
            return Err(DomainError::validation(format!(
                "Item '{}' must have a positive amount",
                name
            )));
        }
        Ok(Self { name, effect, amount })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn effect(&self) -> ItemEffect {
        self.effect
    }

    #[inline]
    pub fn amount(&self) -> i32 {
        self.amount
    }
}

/// The set of items a unit can pick up. Lookup ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCatalog {
    items: Vec<ItemDefinition>,
}

impl ItemCatalog {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if two entries share a name.
    pub fn new(items: Vec<ItemDefinition>) -> Result<Self, DomainError> {
        for (i, item) in items.iter().enumerate() {
            if items[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&item.name))
            {
                return Err(DomainError::validation(format!(
                    "Duplicate item in catalog: {}",
                    item.name
                )));
            }
        }
        Ok(Self { items })
    }

    /// The items shipped with the game.
    pub fn builtin() -> Self {
        let item = |name: &str, effect, amount| ItemDefinition {
            name: name.to_string(),
            effect,
            amount,
        };
        Self {
            items: vec![
                item("potion", ItemEffect::Health, 20),
                item("elixir", ItemEffect::Health, 50),
                item("scroll", ItemEffect::Experience, 10),
                item("tome", ItemEffect::Experience, 30),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&ItemDefinition> {
        let name = name.trim();
        self.items.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Look up an item, failing with a validation error for unknown names.
    pub fn require(&self, name: &str) -> Result<&ItemDefinition, DomainError> {
        self.get(name)
            .ok_or_else(|| DomainError::validation(format!("Unknown item: {}", name.trim())))
    }

    pub fn items(&self) -> &[ItemDefinition] {
        &self.items
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
