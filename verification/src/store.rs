//! The cache-backed tier controller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

use vouch_store::TableStore;
use vouch_types::{MemberProfile, Tier, TierKey, VerificationRecord};

use crate::event::{EventBus, SubscriptionId, TierEvent};
use crate::record;
use crate::VerificationError;

/// Single source of truth for the `(guild, member) → Tier` relation.
///
/// Reads go cache-first and fall back to the durable table, repopulating the
/// cache on the way back; a member with no record at all is written down as
/// unverified. Writes go to storage first and only touch the cache and the
/// event bus once storage has accepted them, so a failed write never leaves
/// the two layers disagreeing.
///
/// The store assumes a single logical owner per process: concurrent writes
/// to the same key are not coordinated (last completer wins per layer), but
/// concurrent cold-cache lookups of one key are collapsed into a single
/// storage round trip so the default record is only inserted once.
pub struct TierStore {
    engine: Arc<dyn TableStore>,
    table: String,
    /// Cached tier per composite key. Unbounded; entries live for the
    /// process lifetime unless purged.
    cache: Mutex<HashMap<TierKey, Tier>>,
    /// Per-key gates for in-flight cache misses.
    in_flight: Mutex<HashMap<TierKey, Arc<AsyncMutex<()>>>>,
    events: EventBus,
    initialized: AtomicBool,
}

impl TierStore {
    /// Create an uninitialized store over the host's table engine.
    ///
    /// `table` is the name of the backing table, usually taken from the
    /// host's configuration. Call [`TierStore::initialize`] before any data
    /// operation.
    pub fn new(engine: Arc<dyn TableStore>, table: impl Into<String>) -> Self {
        Self {
            engine,
            table: table.into(),
            cache: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            events: EventBus::new(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Name of the backing table.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Confirm the backing table exists, creating it when absent.
    ///
    /// One-shot: a second call on an initialized store fails with
    /// [`VerificationError::AlreadyInitialized`]. A call that fails in
    /// storage leaves the store uninitialized and may be retried.
    pub async fn initialize(&self) -> Result<(), VerificationError> {
        if self.initialized.load(Ordering::Acquire) {
            return Err(VerificationError::AlreadyInitialized);
        }
        if !self.engine.has_table(&self.table).await? {
            self.engine
                .create_table(&self.table, &record::table_schema())
                .await?;
            tracing::info!(table = %self.table, "created verification table");
        }
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    /// Best available guess of the member's verification tier.
    ///
    /// Short-circuits: a guild with verification disabled always reads
    /// [`Tier::None`] and an extra role always reads [`Tier::Skipped`],
    /// both without touching cache or storage. The role check runs on every
    /// call, since role assignment can change after a tier was stored; the
    /// stored tier stays intact underneath.
    pub async fn get_tier(&self, member: &MemberProfile) -> Result<Tier, VerificationError> {
        self.ensure_initialized()?;
        if !member.guild.verification_enabled() {
            return Ok(Tier::None);
        }
        if member.has_assigned_role() {
            return Ok(Tier::Skipped);
        }

        let key = member.key();
        if let Some(tier) = self.cached(&key) {
            return Ok(tier);
        }

        let gate = self.miss_gate(&key);
        let guard = gate.lock().await;
        let result = self.load_or_default(member, &key).await;
        drop(guard);
        self.clear_miss_gate(&key);
        result
    }

    /// Authoritative write of a member's tier.
    ///
    /// [`Tier::Skipped`] is never persisted and is rejected before any
    /// storage traffic. When the stored tier exactly equals the guild's
    /// required tier, a [`TierEvent::Verified`] is emitted.
    pub async fn set_tier(
        &self,
        member: &MemberProfile,
        tier: Tier,
    ) -> Result<(), VerificationError> {
        self.ensure_initialized()?;
        if !tier.is_persistable() {
            return Err(VerificationError::InvalidTier(tier));
        }
        self.write_tier(member, tier).await
    }

    /// Delete the member's record from storage and cache, then emit
    /// [`TierEvent::Purged`].
    ///
    /// Deletes by filter, so any duplicate rows a foreign writer produced
    /// for the key disappear along with the record.
    pub async fn purge_tier(&self, member: &MemberProfile) -> Result<(), VerificationError> {
        self.ensure_initialized()?;
        let key = member.key();
        let removed = self
            .engine
            .delete(&self.table, &record::key_filter(&key))
            .await?;
        self.cache.lock().unwrap().remove(&key);
        tracing::debug!(key = %key, rows = removed, "tier purged");
        self.events.emit(&TierEvent::Purged {
            member: member.id.clone(),
        });
        Ok(())
    }

    /// Register an event listener.
    pub fn subscribe(&self, listener: Box<dyn Fn(&TierEvent) + Send + Sync>) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn ensure_initialized(&self) -> Result<(), VerificationError> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(VerificationError::NotInitialized)
        }
    }

    fn cached(&self, key: &TierKey) -> Option<Tier> {
        self.cache.lock().unwrap().get(key).copied()
    }

    /// The async lock all concurrent misses for `key` queue on.
    fn miss_gate(&self, key: &TierKey) -> Arc<AsyncMutex<()>> {
        self.in_flight
            .lock()
            .unwrap()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    fn clear_miss_gate(&self, key: &TierKey) {
        self.in_flight.lock().unwrap().remove(key);
    }

    /// Resolve a cache miss: storage lookup, falling back to writing the
    /// unverified default. Runs under the key's miss gate.
    async fn load_or_default(
        &self,
        member: &MemberProfile,
        key: &TierKey,
    ) -> Result<Tier, VerificationError> {
        // Another task may have resolved this key while we waited on the gate.
        if let Some(tier) = self.cached(key) {
            return Ok(tier);
        }

        let filter = record::key_filter(key);
        if let Some(row) = self.engine.query_first(&self.table, &filter).await? {
            let stored = record::row_to_record(&row)?;
            self.cache.lock().unwrap().insert(key.clone(), stored.level);
            tracing::debug!(key = %key, tier = %stored.level, "tier loaded from storage");
            return Ok(stored.level);
        }

        // No record: the member is unverified until proven otherwise.
        self.write_tier(member, Tier::None).await?;
        Ok(Tier::None)
    }

    /// Upsert `tier` for the member, refresh the cache, and emit
    /// `Verified` when the guild's requirement is now exactly met.
    ///
    /// The collaborator only offers plain insert, so the upsert is composed
    /// as delete-by-key followed by insert.
    async fn write_tier(&self, member: &MemberProfile, tier: Tier) -> Result<(), VerificationError> {
        let key = member.key();
        let filter = record::key_filter(&key);
        let row = record::record_to_row(&VerificationRecord::new(
            key.guild.clone(),
            key.member.clone(),
            tier,
        ));

        self.engine.delete(&self.table, &filter).await?;
        self.engine.insert(&self.table, row).await?;

        self.cache.lock().unwrap().insert(key.clone(), tier);
        tracing::debug!(key = %key, tier = %tier, "tier stored");

        if tier == member.guild.required_tier {
            self.events.emit(&TierEvent::Verified {
                member: member.id.clone(),
                tier,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_nullables::NullTableStore;
    use vouch_types::{GuildId, GuildProfile, MemberId};

    const TABLE: &str = "verification_tiers";

    fn member(id: &str, role_count: u32, required: Tier) -> MemberProfile {
        MemberProfile {
            id: MemberId::new(id),
            guild: GuildProfile::new(GuildId::new("guild-1"), required),
            role_count,
            account_created: None,
            joined_at: None,
            email_confirmed: false,
            phone_confirmed: false,
        }
    }

    fn store_over(engine: &Arc<NullTableStore>) -> TierStore {
        TierStore::new(Arc::clone(engine) as Arc<dyn TableStore>, TABLE)
    }

    #[tokio::test]
    async fn operations_before_initialize_fail_without_touching_storage() {
        let engine = Arc::new(NullTableStore::new());
        let store = store_over(&engine);
        let m = member("m1", 1, Tier::Medium);

        assert!(matches!(
            store.get_tier(&m).await,
            Err(VerificationError::NotInitialized)
        ));
        assert!(matches!(
            store.set_tier(&m, Tier::Low).await,
            Err(VerificationError::NotInitialized)
        ));
        assert!(matches!(
            store.purge_tier(&m).await,
            Err(VerificationError::NotInitialized)
        ));
        assert_eq!(engine.counts().total(), 0);
    }

    #[tokio::test]
    async fn second_initialize_fails_even_when_table_preexisted() {
        let engine = Arc::new(NullTableStore::new());
        engine
            .create_table(TABLE, &record::table_schema())
            .await
            .unwrap();

        let store = store_over(&engine);
        store.initialize().await.unwrap();
        assert!(store.is_initialized());
        assert!(matches!(
            store.initialize().await,
            Err(VerificationError::AlreadyInitialized)
        ));
    }

    #[tokio::test]
    async fn failed_table_creation_leaves_store_uninitialized() {
        let engine = Arc::new(NullTableStore::new());
        let store = store_over(&engine);

        engine.fail_all(true);
        assert!(matches!(
            store.initialize().await,
            Err(VerificationError::Store(_))
        ));
        assert!(!store.is_initialized());

        // The failure was storage-side, not a double call; retry succeeds.
        engine.fail_all(false);
        store.initialize().await.unwrap();
        assert!(store.is_initialized());
    }

    #[tokio::test]
    async fn skipped_is_rejected_and_storage_untouched() {
        let engine = Arc::new(NullTableStore::new());
        let store = store_over(&engine);
        store.initialize().await.unwrap();
        engine.reset_counts();

        let m = member("m1", 1, Tier::Medium);
        assert!(matches!(
            store.set_tier(&m, Tier::Skipped).await,
            Err(VerificationError::InvalidTier(Tier::Skipped))
        ));
        assert_eq!(engine.counts().data_calls(), 0);
        assert_eq!(engine.row_count(TABLE), 0);
    }

    #[tokio::test]
    async fn failed_write_does_not_pollute_the_cache() {
        let engine = Arc::new(NullTableStore::new());
        let store = store_over(&engine);
        store.initialize().await.unwrap();

        let m = member("m1", 1, Tier::Medium);
        engine.fail_all(true);
        assert!(matches!(
            store.set_tier(&m, Tier::Low).await,
            Err(VerificationError::Store(_))
        ));
        engine.fail_all(false);

        // A fresh lookup must go to storage and find nothing, not a cached Low.
        assert_eq!(store.get_tier(&m).await.unwrap(), Tier::None);
    }

    #[tokio::test]
    async fn corrupt_stored_row_surfaces_as_error() {
        let engine = Arc::new(NullTableStore::new());
        let store = store_over(&engine);
        store.initialize().await.unwrap();

        engine
            .insert(
                TABLE,
                vouch_store::Row::new()
                    .set(record::COL_GUILD_ID, "guild-1")
                    .set(record::COL_MEMBER_ID, "m1")
                    .set(record::COL_LEVEL, 42i64),
            )
            .await
            .unwrap();

        let m = member("m1", 1, Tier::Medium);
        assert!(matches!(
            store.get_tier(&m).await,
            Err(VerificationError::Store(vouch_store::StoreError::Corruption(_)))
        ));
    }
}
