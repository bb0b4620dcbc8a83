use thiserror::Error;
use vouch_store::StoreError;
use vouch_types::Tier;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("tier store used before initialize()")]
    NotInitialized,

    #[error("tier store is already initialized")]
    AlreadyInitialized,

    #[error("tier {0} cannot be persisted")]
    InvalidTier(Tier),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
