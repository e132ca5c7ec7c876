//! Warband Engine library.
//!
//! Server-side game state engine for Warband matches.
//!
//! ## Structure
//!
//! - `infrastructure/` - Ports plus document store, clock and random adapters
//! - `repositories/` - Typed aggregate access and guarded changesets
//! - `use_cases/` - One struct per operation, run as optimistic transactions
//! - `facade` - String-in, envelope-out entry point (`GameEngine`)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod config;
pub mod facade;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

/// Shared helpers for unit tests.
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use app::{App, EngineOptions, EnginePorts};
pub use config::{EngineConfig, StoreBackend};
pub use facade::{EngineError, GameEngine};
