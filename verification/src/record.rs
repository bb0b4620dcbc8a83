//! Table layout of verification records and row conversions.
//!
//! One row per `(guild_id, member_id)` pair, with the tier stored as its
//! numeric level. Hosts that want to inspect or migrate the table can reuse
//! the schema and column names from here.

use vouch_store::{ColumnDef, Filter, Row, StoreError, TableSchema};
use vouch_types::{GuildId, MemberId, Tier, TierKey, VerificationRecord};

pub const COL_GUILD_ID: &str = "guild_id";
pub const COL_MEMBER_ID: &str = "member_id";
pub const COL_LEVEL: &str = "level";

/// Schema of the verification table.
pub fn table_schema() -> TableSchema {
    TableSchema::new(vec![
        ColumnDef::text(COL_GUILD_ID).required(),
        ColumnDef::text(COL_MEMBER_ID).required(),
        ColumnDef::integer(COL_LEVEL).required().default_value(0i64),
    ])
}

/// Equality filter selecting all rows for one composite key.
pub fn key_filter(key: &TierKey) -> Filter {
    Filter::new()
        .eq(COL_GUILD_ID, key.guild.as_str())
        .eq(COL_MEMBER_ID, key.member.as_str())
}

/// Encode a record as a table row.
pub fn record_to_row(record: &VerificationRecord) -> Row {
    Row::new()
        .set(COL_GUILD_ID, record.guild_id.as_str())
        .set(COL_MEMBER_ID, record.member_id.as_str())
        .set(COL_LEVEL, i64::from(record.level.level()))
}

/// Decode a table row back into a record.
///
/// Rows with missing columns or an out-of-range / non-persistable level are
/// reported as [`StoreError::Corruption`].
pub fn row_to_record(row: &Row) -> Result<VerificationRecord, StoreError> {
    let guild_id = GuildId::new(row.text(COL_GUILD_ID)?);
    let member_id = MemberId::new(row.text(COL_MEMBER_ID)?);
    let level = row.integer(COL_LEVEL)?;
    let tier = u8::try_from(level)
        .ok()
        .and_then(Tier::from_level)
        .filter(Tier::is_persistable)
        .ok_or_else(|| StoreError::Corruption(format!("invalid stored tier level: {level}")))?;
    Ok(VerificationRecord::new(guild_id, member_id, tier))
}
