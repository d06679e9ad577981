use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown fraud pattern '{name}'")]
    UnknownPattern { name: String },

    #[error("Simulation already running")]
    AlreadyRunning,

    #[error("No transactions to report")]
    NoTransactions,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
