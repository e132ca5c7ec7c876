//! Repositories - typed aggregate storage over the document store.
//!
//! `records` maps aggregates to stored JSON bodies; `store` reads them back
//! with their versions and collects guarded writes into a [`Changeset`].

mod records;
mod store;

pub use records::storable_timestamp;
pub use store::{Changeset, EntityStore, Versioned};
