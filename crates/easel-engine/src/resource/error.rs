use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {name}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("resource {0:?} is not loaded")]
    NotLoaded(String),
}
