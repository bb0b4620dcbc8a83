//! Verification tier tracking — the cache-backed tier controller.
//!
//! [`TierStore`] is the single source of truth for the
//! `(guild, member) → Tier` relation. It combines:
//! - an in-process cache serving repeat lookups without storage traffic,
//! - a durable table behind the host's [`vouch_store::TableStore`] engine,
//! - a synchronous event bus broadcasting `Verified` and `Purged`
//!   transitions to decoupled observers.
//!
//! When no stored value exists for a member, the store infers "unverified"
//! and persists that default, so every looked-up member ends with a record.

pub mod error;
pub mod event;
pub mod record;
pub mod store;

pub use error::VerificationError;
pub use event::{EventBus, SubscriptionId, TierEvent};
pub use store::TierStore;
