//! Directory error types.

/// Errors from loading or querying the bus stop directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The dataset could not be read (missing file, permissions, I/O).
    #[error("failed to read bus stop dataset: {0}")]
    Source(#[from] std::io::Error),

    /// The dataset was read but is not a well-formed list of stops.
    #[error("malformed bus stop dataset: {message}")]
    Parse { message: String },

    /// Nearest-stop search on a directory with no stops.
    #[error("no bus stops available")]
    Empty,
}
