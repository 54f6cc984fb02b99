use crate::types::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cannot find item '{name}' in the item db")]
    UnknownItemName { name: String },

    #[error("cannot find item id {id} in the item db")]
    UnknownItemId { id: ItemId },

    #[error("no removal targets given (use --clean for a pure cleanup run)")]
    NoTargets,

    #[error("unknown flag: {flag}")]
    UnknownFlag { flag: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SweepResult<T> = Result<T, SweepError>;
