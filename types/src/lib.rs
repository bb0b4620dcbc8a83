//! Fundamental types for vouch.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: guild/member identifiers, the verification tier ladder, the
//! durable verification record, platform snapshots, and timestamps.

pub mod id;
pub mod profile;
pub mod record;
pub mod tier;
pub mod time;

pub use id::{GuildId, MemberId, TierKey};
pub use profile::{GuildProfile, MemberProfile};
pub use record::VerificationRecord;
pub use tier::Tier;
pub use time::Timestamp;
