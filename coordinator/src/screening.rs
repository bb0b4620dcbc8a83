//! Heuristics estimating which tier a member's signals support.
//!
//! The signals are partial and untrustworthy by design; this module applies
//! the fixed tier ladder to whatever the platform supplied and nothing
//! more. The thresholds and the ladder shape are documented business policy
//! and must not be generalized.

use vouch_types::{MemberProfile, Tier, Timestamp};

/// Minimum account age for [`Tier::Medium`]: five minutes.
pub const MIN_ACCOUNT_AGE_SECS: u64 = 5 * 60;

/// Minimum guild membership age for [`Tier::High`]: ten minutes.
pub const MIN_MEMBERSHIP_AGE_SECS: u64 = 10 * 60;

/// The strongest tier this member's snapshot supports at `now`.
///
/// A missing timestamp fails its age check; a member with no usable signal
/// reads as [`Tier::None`]. Never returns [`Tier::Skipped`]: role-based
/// bypasses are the tier store's concern, not a screening signal.
pub fn observed_tier(member: &MemberProfile, now: Timestamp) -> Tier {
    if member.phone_confirmed {
        return Tier::Highest;
    }

    let account_old_enough = member
        .account_created
        .map(|created| created.elapsed_since(now) >= MIN_ACCOUNT_AGE_SECS)
        .unwrap_or(false);
    let member_long_enough = member
        .joined_at
        .map(|joined| joined.elapsed_since(now) >= MIN_MEMBERSHIP_AGE_SECS)
        .unwrap_or(false);

    if account_old_enough && member_long_enough {
        return Tier::High;
    }
    if account_old_enough {
        return Tier::Medium;
    }
    if member.email_confirmed {
        return Tier::Low;
    }
    Tier::None
}
