//! Result type alias for WebMirror operations

use crate::Error;

/// Result type alias for WebMirror operations
pub type Result<T> = std::result::Result<T, Error>;
