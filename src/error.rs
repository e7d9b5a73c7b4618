use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("min_frame_area must be > 0")]
    InvalidMinFrameArea,
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },
    #[error("image has no non-transparent pixels after preprocessing ({width}x{height})")]
    NoContent { width: usize, height: usize },
    #[error("pixel data length {actual} does not match width * height * 4 ({expected})")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl SplitError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
