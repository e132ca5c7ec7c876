//! Domain events returned from aggregate mutations.

pub mod unit_events;

pub use unit_events::{DamageOutcome, ExperienceAwarded, HealthRestored};
