use log::{info, warn, error};

use crate::artifacts::{ArtifactSource, ArtifactStore, JsonArtifactSource, LoadError};
use crate::classifier::{Classifier, ClassifierError, Vectorizer};
use crate::config::AppConfig;
use crate::messages::Locale;

/// What a single render ends in. Exactly one of these is produced per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Artifacts are loaded but the action did not fire
    Idle,
    /// At least one artifact file is missing
    Unavailable,
    /// The action fired with blank input
    Warning,
    /// The predicted label
    Success(String),
    /// Loading or inference failed; carries the error text
    Fault(String),
}

impl RenderOutcome {
    /// The user-facing text for this outcome, `None` when nothing is shown
    pub fn message(&self, locale: Locale) -> Option<String> {
        match self {
            RenderOutcome::Idle => None,
            RenderOutcome::Unavailable => Some(locale.unavailable().to_string()),
            RenderOutcome::Warning => Some(locale.blank_input().to_string()),
            RenderOutcome::Success(label) => Some(locale.success(label)),
            RenderOutcome::Fault(details) => Some(locale.fault(details)),
        }
    }
}

/// Runs the vectorizer on `[text]`, feeds the result to the classifier and
/// returns the first predicted label.
pub fn infer<C, V>(classifier: &C, vectorizer: &V, text: &str) -> Result<String, ClassifierError>
where
    C: Classifier + ?Sized,
    V: Vectorizer + ?Sized,
{
    let features = vectorizer.transform(&[text])?;
    classifier
        .predict(&features)?
        .into_iter()
        .next()
        .ok_or_else(|| ClassifierError::PredictionError("Classifier returned no labels".into()))
}

/// One front-end session: the artifact store plus the display language.
///
/// Every call to [`App::render`] is a full render cycle. Artifacts are
/// checked (and, unless caching is on, deserialized) on every render, before
/// the action is looked at.
pub struct App<S: ArtifactSource> {
    store: ArtifactStore<S>,
    locale: Locale,
}

impl App<JsonArtifactSource> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ArtifactStore::from_config(config), config.locale)
    }
}

impl<S: ArtifactSource> App<S> {
    pub fn new(store: ArtifactStore<S>, locale: Locale) -> Self {
        Self { store, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn store(&self) -> &ArtifactStore<S> {
        &self.store
    }

    /// Runs one render cycle.
    ///
    /// # Arguments
    /// * `input` - Current contents of the text field
    /// * `submitted` - Whether the "Analisar" action fired in this render
    pub fn render(&mut self, input: &str, submitted: bool) -> RenderOutcome {
        let artifacts = match self.store.load() {
            Ok(artifacts) => artifacts,
            Err(LoadError::Missing { .. }) => return RenderOutcome::Unavailable,
            Err(LoadError::Artifact(e)) => {
                error!("Could not load artifacts: {}", e);
                return RenderOutcome::Fault(e.to_string());
            }
        };

        if !submitted {
            return RenderOutcome::Idle;
        }

        if input.trim().is_empty() {
            warn!("Blank input submitted, skipping inference");
            return RenderOutcome::Warning;
        }

        info!("Analyzing input ({} chars)", input.chars().count());
        match infer(&artifacts.classifier, &artifacts.vectorizer, input) {
            Ok(label) => {
                info!("Predicted label: {}", label);
                RenderOutcome::Success(label)
            }
            Err(e) => {
                error!("Inference failed: {}", e);
                RenderOutcome::Fault(e.to_string())
            }
        }
    }

    /// Text for `outcome` in this session's language
    pub fn display(&self, outcome: &RenderOutcome) -> Option<String> {
        outcome.message(self.locale)
    }
}
