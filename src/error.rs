use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Inconsistent tree at node {node}: {reason}")]
    Inconsistent { node: usize, reason: String },

    #[error("Payoffs have not been propagated to the root yet")]
    NotSolved,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;
