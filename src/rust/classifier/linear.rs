use ndarray::{Array1, Array2, Axis};
use serde::Deserialize;

use super::error::ClassifierError;
use super::Features;

/// Maps a feature matrix to one predicted label per row.
pub trait Classifier {
    fn predict(&self, features: &Features) -> Result<Vec<String>, ClassifierError>;
}

/// A fitted linear decision function `features · coefᵀ + intercept`.
///
/// Two layouts are accepted:
/// - binary: one coefficient row and two classes, a positive score selects
///   `classes[1]` and anything else `classes[0]`
/// - one-vs-rest / multinomial: one row per class, the highest score wins and
///   ties go to the earlier class
///
/// Logistic regression, linear SVMs and multinomial naive Bayes (with log
/// probabilities as coefficients) all export to this shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawLinearClassifier")]
pub struct LinearClassifier {
    classes: Vec<String>,
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

/// On-disk layout; labels may be written as strings or integers
#[derive(Debug, Deserialize)]
struct RawLinearClassifier {
    classes: Vec<ClassLabel>,
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassLabel {
    Text(String),
    Integer(i64),
}

impl From<ClassLabel> for String {
    fn from(label: ClassLabel) -> Self {
        match label {
            ClassLabel::Text(text) => text,
            ClassLabel::Integer(value) => value.to_string(),
        }
    }
}

impl TryFrom<RawLinearClassifier> for LinearClassifier {
    type Error = ClassifierError;

    fn try_from(raw: RawLinearClassifier) -> Result<Self, Self::Error> {
        let classes = raw.classes.into_iter().map(String::from).collect();
        LinearClassifier::new(classes, raw.coef, raw.intercept)
    }
}

impl LinearClassifier {
    /// Creates a classifier from its fitted parameters.
    ///
    /// # Arguments
    /// * `classes` - Labels in the order the model was fitted with
    /// * `coef` - One row of feature weights per decision function
    /// * `intercept` - One bias per decision function
    ///
    /// # Returns
    /// * `Err(ClassifierError::ValidationError)` if:
    ///   - there are fewer than two classes
    ///   - the number of rows matches neither the binary nor the per-class layout
    ///   - `intercept` and `coef` disagree on the number of rows
    ///   - the rows have different widths or no features at all
    ///   - any parameter is NaN or infinite
    ///
    /// # Example
    /// ```
    /// use sentimento::LinearClassifier;
    ///
    /// let model = LinearClassifier::new(
    ///     vec!["negative".into(), "positive".into()],
    ///     vec![vec![-1.5, 2.0]],
    ///     vec![0.1],
    /// ).unwrap();
    /// assert_eq!(model.n_features(), 2);
    /// ```
    pub fn new(
        classes: Vec<String>,
        coef: Vec<Vec<f32>>,
        intercept: Vec<f32>,
    ) -> Result<Self, ClassifierError> {
        if classes.len() < 2 {
            return Err(ClassifierError::ValidationError(format!(
                "A classifier needs at least two classes, got {}",
                classes.len()
            )));
        }

        let rows = coef.len();
        let binary = rows == 1 && classes.len() == 2;
        if !binary && rows != classes.len() {
            return Err(ClassifierError::ValidationError(format!(
                "{} coefficient rows do not fit {} classes",
                rows,
                classes.len()
            )));
        }
        if intercept.len() != rows {
            return Err(ClassifierError::ValidationError(format!(
                "Expected {} intercepts, got {}",
                rows,
                intercept.len()
            )));
        }

        let width = coef[0].len();
        if width == 0 {
            return Err(ClassifierError::ValidationError("Coefficient rows cannot be empty".into()));
        }
        if let Some(pos) = coef.iter().position(|row| row.len() != width) {
            return Err(ClassifierError::ValidationError(format!(
                "Coefficient row {} has {} features, expected {}",
                pos,
                coef[pos].len(),
                width
            )));
        }
        if coef.iter().flatten().chain(intercept.iter()).any(|w| !w.is_finite()) {
            return Err(ClassifierError::ValidationError(
                "Model parameters must be finite numbers".into(),
            ));
        }

        let coef = Array2::from_shape_vec((rows, width), coef.into_iter().flatten().collect())
            .map_err(|e| ClassifierError::ValidationError(e.to_string()))?;

        Ok(Self {
            classes,
            coef,
            intercept: Array1::from(intercept),
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Width of the feature rows this model was fitted on
    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    /// Raw scores, one row per document and one column per decision function
    pub fn decision_function(&self, features: &Features) -> Result<Array2<f32>, ClassifierError> {
        if features.ncols() != self.n_features() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features(),
                actual: features.ncols(),
            });
        }
        Ok(features.dot(&self.coef.t()) + &self.intercept)
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &Features) -> Result<Vec<String>, ClassifierError> {
        let scores = self.decision_function(features)?;
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ClassifierError::PredictionError(
                "Decision function produced a non-finite score".into(),
            ));
        }

        let labels = scores
            .axis_iter(Axis(0))
            .map(|row| {
                let winner = if row.len() == 1 {
                    usize::from(row[0] > 0.0)
                } else {
                    row.iter()
                        .enumerate()
                        .fold((0, f32::NEG_INFINITY), |best, (idx, &score)| {
                            if score > best.1 { (idx, score) } else { best }
                        })
                        .0
                };
                self.classes[winner].clone()
            })
            .collect();

        Ok(labels)
    }
}
