//! Per-call snapshots of platform state.
//!
//! The chat-platform client is an external collaborator; these structs carry
//! the slice of its member/guild objects that verification tracking reads.
//! Snapshots are taken fresh for every call; in particular the role count
//! can change at any time and must never be cached.

use crate::{GuildId, MemberId, Tier, TierKey, Timestamp};
use serde::{Deserialize, Serialize};

/// Snapshot of the guild-level verification settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildProfile {
    pub id: GuildId,
    /// The tier a member must satisfy to be considered verified.
    /// `Tier::None` means the guild has verification disabled entirely.
    pub required_tier: Tier,
}

impl GuildProfile {
    pub fn new(id: GuildId, required_tier: Tier) -> Self {
        Self { id, required_tier }
    }

    /// Whether the guild requires any verification at all.
    pub fn verification_enabled(&self) -> bool {
        self.required_tier != Tier::None
    }
}

/// Snapshot of one member, including the signals the screening heuristic
/// reads. Timestamps are absent when the platform did not supply them;
/// missing signals count as unsatisfied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: MemberId,
    pub guild: GuildProfile,
    /// Number of roles assigned to the member. Exactly 1 means only the
    /// implicit default membership role.
    pub role_count: u32,
    /// When the member's platform account was created.
    pub account_created: Option<Timestamp>,
    /// When the member joined this guild.
    pub joined_at: Option<Timestamp>,
    /// Whether the account's email address is confirmed.
    pub email_confirmed: bool,
    /// Whether the account's phone number is confirmed.
    pub phone_confirmed: bool,
}

impl MemberProfile {
    /// The composite key of this member's verification record.
    pub fn key(&self) -> TierKey {
        TierKey::new(self.guild.id.clone(), self.id.clone())
    }

    /// Whether the member holds any role beyond the implicit default one.
    pub fn has_assigned_role(&self) -> bool {
        self.role_count > 1
    }
}
