use thiserror::Error;

/// Errors raised while translating between datasets and spectra.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    #[error("coordinate object must be a recognized world-coordinate transform or a SpectralCoordinates instance")]
    TypeMismatch,

    #[error("more than one attribute present; caller must specify which one is flux")]
    AmbiguousAttribute,

    #[error("dataset has no attributes")]
    EmptyDataset,

    #[error("no attribute named '{0}' in dataset")]
    UnknownAttribute(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Spectral positions must be strictly increasing or strictly decreasing.
    #[error("spectral values are not monotonic (first violation at index {0})")]
    NotMonotonic(usize),
}

pub type Result<T> = std::result::Result<T, TranslateError>;
