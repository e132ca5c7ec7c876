//! Use cases - one struct per engine operation.
//!
//! Mutating use cases run inside [`transaction::TransactionRetry`]: read
//! versioned snapshots, resolve with the pure domain rules, commit one
//! guarded changeset, and start over if the commit lost a race.

pub mod combat;
pub mod items;
pub mod session;
pub mod transaction;

pub use combat::CombatUseCases;
pub use items::ItemUseCases;
pub use session::SessionUseCases;
