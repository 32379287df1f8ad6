use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while setting up or driving the demo
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal or file system I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A texture file exists but could not be decoded
    #[error("Failed to decode texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// A texture decoded to zero pixels
    #[error("Texture {0} has no pixels")]
    EmptyTexture(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
