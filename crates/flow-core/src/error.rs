use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("hand landmark model failed to load: {0}")]
    ModelLoad(String),
    #[error("tracking start was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoemError {
    #[error("malformed poem payload: {0}")]
    Malformed(String),
    #[error("poem payload had no text")]
    Empty,
}
