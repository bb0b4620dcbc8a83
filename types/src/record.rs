//! The durable verification record.

use crate::{GuildId, MemberId, Tier, TierKey};
use serde::{Deserialize, Serialize};

/// One stored verification fact: which tier a member of a guild has satisfied.
///
/// Uniquely keyed by `(guild_id, member_id)`; at most one record per key is
/// intended to exist in storage. `level` is always a persistable tier (0–4).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub guild_id: GuildId,
    pub member_id: MemberId,
    pub level: Tier,
}

impl VerificationRecord {
    pub fn new(guild_id: GuildId, member_id: MemberId, level: Tier) -> Self {
        Self {
            guild_id,
            member_id,
            level,
        }
    }

    /// The composite key identifying this record.
    pub fn key(&self) -> TierKey {
        TierKey::new(self.guild_id.clone(), self.member_id.clone())
    }
}
