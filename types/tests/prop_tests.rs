use proptest::prelude::*;

use vouch_types::{GuildId, MemberId, Tier, TierKey, Timestamp};

proptest! {
    /// Tier level roundtrip: from_level -> level is the identity on 0..=5.
    #[test]
    fn tier_level_roundtrip(level in 0u8..=5) {
        let tier = Tier::from_level(level).unwrap();
        prop_assert_eq!(tier.level(), level);
    }

    /// Levels above 5 never map to a tier.
    #[test]
    fn tier_out_of_range_is_rejected(level in 6u8..) {
        prop_assert!(Tier::from_level(level).is_none());
    }

    /// Tier ordering matches numeric level ordering for persistable tiers.
    #[test]
    fn tier_ordering_matches_levels(a in 0u8..=4, b in 0u8..=4) {
        let ta = Tier::from_level(a).unwrap();
        let tb = Tier::from_level(b).unwrap();
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// satisfies is exactly the at-least-required check for persistable tiers.
    #[test]
    fn satisfies_matches_level_comparison(have in 0u8..=4, need in 0u8..=4) {
        let have_tier = Tier::from_level(have).unwrap();
        let need_tier = Tier::from_level(need).unwrap();
        prop_assert_eq!(have_tier.satisfies(need_tier), have >= need);
    }

    /// Skipped satisfies every possible requirement.
    #[test]
    fn skipped_satisfies_all(need in 0u8..=5) {
        let required = Tier::from_level(need).unwrap();
        prop_assert!(Tier::Skipped.satisfies(required));
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// elapsed_since never underflows, even with a future timestamp.
    #[test]
    fn elapsed_since_never_underflows(start in 0u64..u64::MAX, now in 0u64..u64::MAX) {
        let elapsed = Timestamp::new(start).elapsed_since(Timestamp::new(now));
        prop_assert_eq!(elapsed, now.saturating_sub(start));
    }

    /// Keys are equal exactly when both components are equal.
    #[test]
    fn key_equality_is_componentwise(g1 in "[a-z0-9]{1,12}", m1 in "[a-z0-9]{1,12}",
                                     g2 in "[a-z0-9]{1,12}", m2 in "[a-z0-9]{1,12}") {
        let a = TierKey::new(GuildId::new(g1.clone()), MemberId::new(m1.clone()));
        let b = TierKey::new(GuildId::new(g2.clone()), MemberId::new(m2.clone()));
        prop_assert_eq!(a == b, g1 == g2 && m1 == m2);
    }
}
