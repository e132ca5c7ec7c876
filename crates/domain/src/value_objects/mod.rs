//! Value objects - immutable, validated-by-construction domain values.

pub mod item;
pub mod names;
pub mod unit_type;

pub use item::{ItemCatalog, ItemDefinition, ItemEffect};
pub use names::{GameName, Username};
pub use unit_type::UnitType;
