//! Text-to-label building blocks: a fitted vectorizer that turns raw text into
//! a feature matrix and a fitted linear classifier that maps features to labels.

use ndarray::Array2;

mod error;
mod linear;
mod utils;
mod vectorizer;

pub use error::ClassifierError;
pub use linear::{Classifier, LinearClassifier};
pub use vectorizer::{Norm, TfidfVectorizer, Vectorizer};

/// Dense feature matrix, one row per document and one column per vocabulary term.
pub type Features = Array2<f32>;
