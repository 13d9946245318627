use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur in the image classifier.
#[derive(Debug)]
pub enum ClassifierError {
    /// The input tensor's shape does not match what the predictor expects
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    /// The requested number of top results is outside `1..=catalog length`
    InvalidTopK { k: usize, catalog_len: usize },
    /// The predictor failed while running the model
    InferenceFailed(String),
    /// The model's output width does not match the catalog length
    CatalogMismatch {
        catalog_len: usize,
        output_len: usize,
    },
    /// Error occurred during the build phase
    BuildError(String),
    /// Error occurred due to invalid input parameters
    ValidationError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "Shape mismatch: expected {:?}, got {:?}", expected, actual)
            }
            Self::InvalidTopK { k, catalog_len } => write!(
                f,
                "Invalid top-k: {} (must be between 1 and {})",
                k, catalog_len
            ),
            Self::InferenceFailed(msg) => write!(f, "Inference failed: {}", msg),
            Self::CatalogMismatch {
                catalog_len,
                output_len,
            } => write!(
                f,
                "Catalog mismatch: catalog has {} labels but the model produces {} scores",
                catalog_len, output_len
            ),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::BuildError(err.to_string())
    }
}
