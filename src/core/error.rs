//! Error types for the option payoff explorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    /// A row or basket index no longer exists (the chain was re-reconciled
    /// or the basket changed since the caller last looked).
    #[error("Stale selection: index {index} out of range (len {len})")]
    StaleSelection { index: usize, len: usize },

    #[error("Invalid quantity: {0} (must be a positive integer)")]
    InvalidQuantity(i64),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type OpcResult<T> = Result<T, OpcError>;

impl OpcError {
    pub fn stale(index: usize, len: usize) -> Self {
        Self::StaleSelection { index, len }
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Recoverable by discarding the triggering UI event
    pub fn is_stale_selection(&self) -> bool {
        matches!(self, Self::StaleSelection { .. })
    }
}

impl From<serde_json::Error> for OpcError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
