// One error type for the whole crate.
// Every variant states *what kind* of misuse or failure happened; the message says where.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The entity or surface is in the wrong state for this call
    /// (not drawn yet, drawn twice, surface not animated, surface dropped).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The call is well-formed but this surface/format combination cannot do it.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A malformed value was passed in (obstacle coords, collider kind, color spec).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Decoding a bitmap or encoding an export failed
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// Creating or writing an export target failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Opening or updating the preview window failed
    #[error("preview window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, Error>;
