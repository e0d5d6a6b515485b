use thiserror::Error;

use crate::Status;

#[derive(Debug, Error)]
pub enum BtError {
    #[error("controller has not been started")]
    NotStarted,
    #[error("behavior tree already exited with {0}")]
    Exited(Status),
    #[error("controller has no root node")]
    RootUnset,
    #[error("unknown bound method: {0}")]
    UnknownBinding(String),
    #[error("invalid tree definition: {0}")]
    InvalidDefinition(String),
    #[cfg(feature = "serde")]
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[cfg(feature = "serde")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
