//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Document storage (in-memory or SQLite)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

// =============================================================================
// Storage Port
// =============================================================================
pub use repos::DocumentStore;
pub use types::{Collection, Document, Expect, Filter, FilterOp, Guard, Write, WriteBatch};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::MockDocumentStore;

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
