use std::fmt;

/// Represents the different types of errors that can occur while turning text into a label.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Error occurred while turning text into features
    VectorizerError(String),
    /// The feature width does not match what the classifier was fitted on
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },
    /// Error occurred while making predictions
    PredictionError(String),
    /// Error occurred due to invalid parameters or artifact contents
    ValidationError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VectorizerError(msg) => write!(f, "Vectorizer error: {}", msg),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "Feature dimension mismatch: classifier expects {} features, got {}",
                expected, actual
            ),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

