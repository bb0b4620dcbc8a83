use thiserror::Error;
use vouch_verification::VerificationError;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("verification error: {0}")]
    Verification(#[from] VerificationError),

    #[error("config error: {0}")]
    Config(String),
}
