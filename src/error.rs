use thiserror::Error;

use crate::block::BlockKind;
use crate::bus::PublishError;
use crate::model::ModelError;

/// Errors surfaced by the composition engine.
///
/// Failures with a safe default (a missing store record, a malformed stored
/// theme or layout) never show up here; they are recovered where they occur.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No merchant in the session; fetch and save are refused.
    #[error("no authenticated merchant in session")]
    NotAuthenticated,

    /// A block type outside the closed catalog was requested.
    #[error("unknown block type: {0}")]
    UnknownBlockType(String),

    /// Load or upsert against the persistence boundary failed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] ModelError),

    /// Subscribing to change notifications failed.
    #[error("subscription failure: {0}")]
    Subscription(#[from] PublishError),

    /// A mutation was attempted before any store was fetched.
    #[error("store not loaded")]
    NotLoaded,

    /// A settings patch does not fit the block's settings shape.
    #[error("invalid settings for {kind} block: {message}")]
    InvalidSettings { kind: BlockKind, message: String },

    #[error("controller lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl EngineError {
    /// Whether retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::Persistence(_) | EngineError::Subscription(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
