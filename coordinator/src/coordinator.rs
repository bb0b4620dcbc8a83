//! Platform-event handlers and the public verification query surface.

use vouch_types::{MemberProfile, Tier, Timestamp};
use vouch_verification::TierStore;

use crate::screening;
use crate::CoordinatorError;

/// Wires platform membership events into the tier store and answers
/// verification queries for the host.
///
/// Failures are member-scoped: every handler logs the failure with the
/// member in context and returns it, so the host can keep processing its
/// remaining members. Nothing here retries; storage failures surface to
/// whoever scheduled the event.
pub struct Coordinator {
    store: TierStore,
}

impl Coordinator {
    /// Wrap an already-initialized tier store.
    pub fn new(store: TierStore) -> Self {
        Self { store }
    }

    /// The underlying tier store, e.g. for event subscriptions.
    pub fn store(&self) -> &TierStore {
        &self.store
    }

    /// A member joined: seed their verification record.
    ///
    /// A first-time member lands the unverified default; a returning member
    /// reads whatever tier is already stored.
    pub async fn member_joined(&self, member: &MemberProfile) -> Result<Tier, CoordinatorError> {
        let tier = self.store.get_tier(member).await.map_err(|e| {
            tracing::warn!(member = %member.id, guild = %member.guild.id, error = %e,
                "tier lookup on join failed");
            e
        })?;
        tracing::debug!(member = %member.id, guild = %member.guild.id, %tier, "member joined");
        Ok(tier)
    }

    /// A member left: drop their record and announce the purge.
    pub async fn member_departed(&self, member: &MemberProfile) -> Result<(), CoordinatorError> {
        self.store.purge_tier(member).await.map_err(|e| {
            tracing::warn!(member = %member.id, guild = %member.guild.id, error = %e,
                "purge on departure failed");
            e
        })?;
        tracing::debug!(member = %member.id, guild = %member.guild.id, "member departed");
        Ok(())
    }

    /// A member's message was observed: re-screen them and upgrade the
    /// stored tier if their signals now support a stronger one.
    ///
    /// When the screened tier satisfies the guild's requirement, exactly the
    /// required tier is stored, which is what fires the `Verified` event.
    /// Weaker progress is recorded as-is and fires nothing.
    pub async fn message_observed(
        &self,
        member: &MemberProfile,
        now: Timestamp,
    ) -> Result<(), CoordinatorError> {
        let guild = &member.guild;
        if !guild.verification_enabled() {
            return Ok(());
        }

        let current = self.store.get_tier(member).await.map_err(|e| {
            tracing::warn!(member = %member.id, guild = %guild.id, error = %e,
                "tier lookup on message failed");
            e
        })?;
        if current.satisfies(guild.required_tier) {
            return Ok(());
        }

        let observed = screening::observed_tier(member, now);
        let upgrade = if observed.satisfies(guild.required_tier) {
            Some(guild.required_tier)
        } else if observed > current {
            Some(observed)
        } else {
            None
        };

        if let Some(tier) = upgrade {
            self.store.set_tier(member, tier).await.map_err(|e| {
                tracing::warn!(member = %member.id, guild = %guild.id, %tier, error = %e,
                    "tier upgrade failed");
                e
            })?;
            tracing::debug!(member = %member.id, guild = %guild.id, from = %current, to = %tier,
                "tier upgraded");
        }
        Ok(())
    }

    /// Whether the member currently satisfies their guild's required tier.
    pub async fn is_verified(&self, member: &MemberProfile) -> Result<bool, CoordinatorError> {
        let tier = self.store.get_tier(member).await?;
        Ok(tier.satisfies(member.guild.required_tier))
    }

    /// The member's current verification tier, as the store sees it.
    pub async fn verification_level(
        &self,
        member: &MemberProfile,
    ) -> Result<Tier, CoordinatorError> {
        Ok(self.store.get_tier(member).await?)
    }
}
