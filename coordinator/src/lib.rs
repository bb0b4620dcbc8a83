//! Coordinator — connects platform membership events to the tier store.
//!
//! The host application subscribes to its chat platform's notifications and
//! forwards them here: joins seed verification records, departures purge
//! them, and observed messages drive the screening heuristic that upgrades
//! a member's stored tier. The coordinator also exposes the query surface
//! (`is_verified`, `verification_level`) the rest of the host reads.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod screening;

pub use config::CoordinatorConfig;
pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use logging::{init_logging, LogFormat};
