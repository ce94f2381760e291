use std::collections::{HashMap, HashSet};
use ndarray::ArrayView1;
use serde::Deserialize;

use super::error::ClassifierError;
use super::utils::{l1_normalize, l2_normalize, normalize_rows};
use super::Features;

/// Turns a batch of raw documents into a feature matrix.
///
/// Implementations must return one row per input document, in input order.
/// The column layout is whatever the paired classifier was fitted on.
pub trait Vectorizer {
    fn transform(&self, documents: &[&str]) -> Result<Features, ClassifierError>;
}

/// Row normalization applied after term weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// A fitted bag-of-words vectorizer with optional TF-IDF weighting.
///
/// Without `idf` weights this behaves as a plain term counter. Tokens are the
/// maximal runs of alphanumeric or underscore characters that are at least two
/// characters long; stop words are dropped before n-grams are formed.
///
/// # Example
/// ```
/// use sentimento::{TfidfVectorizer, Vectorizer};
///
/// let vectorizer = TfidfVectorizer::new([("happy", 0), ("sad", 1)]);
/// let features = vectorizer.transform(&["so happy today"]).unwrap();
/// assert_eq!(features.shape(), &[1, 2]);
/// assert_eq!(features[[0, 0]], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TfidfVectorizer {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column; `None` keeps raw counts
    #[serde(default)]
    pub idf: Option<Vec<f32>>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    /// Record term presence (1.0) instead of counts
    #[serde(default)]
    pub binary: bool,
    /// Replace a count `tf` with `1 + ln(tf)`
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Creates a count vectorizer over the given vocabulary with default settings
    /// (lowercasing, unigrams, L2 normalization, no IDF weighting).
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            vocabulary: vocabulary.into_iter().map(|(term, idx)| (term.into(), idx)).collect(),
            idf: None,
            lowercase: true,
            binary: false,
            sublinear_tf: false,
            ngram_range: (1, 1),
            norm: Some(Norm::L2),
            stop_words: HashSet::new(),
        }
    }

    pub fn with_idf(mut self, idf: Vec<f32>) -> Self {
        self.idf = Some(idf);
        self
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_stop_words(mut self, stop_words: Vec<impl Into<String>>) -> Self {
        self.stop_words = stop_words.into_iter().map(Into::into).collect();
        self
    }

    /// Number of feature columns produced by `transform`
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Checks the fitted state is internally consistent:
    /// - the vocabulary is not empty and its indices cover `0..len` exactly once
    /// - `idf`, when present, has one finite weight per column
    /// - `ngram_range` satisfies `1 <= min <= max`
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let size = self.vocabulary.len();
        if size == 0 {
            return Err(ClassifierError::ValidationError("Vocabulary cannot be empty".into()));
        }

        let mut seen = vec![false; size];
        for (term, &idx) in &self.vocabulary {
            if idx >= size {
                return Err(ClassifierError::ValidationError(format!(
                    "Vocabulary index {} for term '{}' is out of range (size {})",
                    idx, term, size
                )));
            }
            if seen[idx] {
                return Err(ClassifierError::ValidationError(format!(
                    "Vocabulary index {} is assigned to more than one term",
                    idx
                )));
            }
            seen[idx] = true;
        }

        if let Some(idf) = &self.idf {
            if idf.len() != size {
                return Err(ClassifierError::ValidationError(format!(
                    "IDF has {} weights but the vocabulary has {} terms",
                    idf.len(),
                    size
                )));
            }
            if let Some(pos) = idf.iter().position(|w| !w.is_finite()) {
                return Err(ClassifierError::ValidationError(format!(
                    "IDF weight {} is not a finite number",
                    pos
                )));
            }
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::ValidationError(format!(
                "Invalid n-gram range ({}, {})",
                min_n, max_n
            )));
        }
        Ok(())
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Splits a document into the terms looked up in the vocabulary
    fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let (min_n, max_n) = self.ngram_range;
        if min_n == 1 && max_n == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, documents: &[&str]) -> Result<Features, ClassifierError> {
        let size = self.vocabulary.len();
        let mut features = Features::zeros((documents.len(), size));

        for (row, document) in documents.iter().enumerate() {
            for term in self.analyze(document) {
                if let Some(&col) = self.vocabulary.get(&term) {
                    if col >= size {
                        return Err(ClassifierError::VectorizerError(format!(
                            "Vocabulary index {} is out of range (size {})",
                            col, size
                        )));
                    }
                    features[[row, col]] += 1.0;
                }
            }
        }

        if self.binary {
            features.mapv_inplace(|tf| if tf > 0.0 { 1.0 } else { 0.0 });
        }
        if self.sublinear_tf {
            features.mapv_inplace(|tf| if tf > 0.0 { 1.0 + tf.ln() } else { 0.0 });
        }

        if let Some(idf) = &self.idf {
            if idf.len() != size {
                return Err(ClassifierError::VectorizerError(format!(
                    "IDF has {} weights but the vocabulary has {} terms",
                    idf.len(),
                    size
                )));
            }
            features *= &ArrayView1::from(idf.as_slice());
        }

        match self.norm {
            Some(Norm::L2) => normalize_rows(&mut features, l2_normalize),
            Some(Norm::L1) => normalize_rows(&mut features, l1_normalize),
            None => {}
        }

        Ok(features)
    }
}
