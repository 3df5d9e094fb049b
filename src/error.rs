use std::io;
use std::path::PathBuf;

use crate::format::ImageFormat;

/// Errors from decoding, encoding, and converting images.
///
/// Every variant is terminal for the current conversion; nothing is retried.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("unrecognized input format: {}", .0.display())]
    UnrecognizedInputFormat(PathBuf),

    #[error("unrecognized output format: {}", .0.display())]
    UnrecognizedOutputFormat(PathBuf),

    /// No decoder is registered for a format chosen by tag rather than path.
    #[error("no {0} decoder available")]
    NoDecoder(ImageFormat),

    /// No encoder is registered for a format chosen by tag rather than path.
    #[error("no {0} encoder available")]
    NoEncoder(ImageFormat),

    /// Magic bytes do not match the format selected for the input.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("truncated data: need {needed} bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u8),

    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("{format} decode error: {message}")]
    DecodeError {
        format: ImageFormat,
        message: String,
    },

    #[error("{format} encode error: {message}")]
    EncodeError {
        format: ImageFormat,
        message: String,
    },

    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl ConvertError {
    pub(crate) fn decode(format: ImageFormat, message: impl Into<String>) -> Self {
        ConvertError::DecodeError {
            format,
            message: message.into(),
        }
    }

    pub(crate) fn encode(format: ImageFormat, message: impl Into<String>) -> Self {
        ConvertError::EncodeError {
            format,
            message: message.into(),
        }
    }
}
