use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid storage key \"{0}\"")]
    InvalidKey(String),
}
