use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    State(#[from] crate::tfstate::StateError),

    #[error(transparent)]
    Api(#[from] crate::api::ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
