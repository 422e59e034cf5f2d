use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid asset filename pattern for prefix \"{prefix}\": {source}")]
    Pattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read asset directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
