//! A terminal sentiment classifier front-end.
//!
//! Loads a pretrained linear classifier and its fitted TF-IDF vectorizer from
//! two JSON artifacts, takes one line of text per submission and shows the
//! predicted label.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use sentimento::{App, AppConfig, RenderOutcome};
//!
//! let mut app = App::from_config(&AppConfig::default());
//! match app.render("What a lovely day", true) {
//!     RenderOutcome::Success(label) => println!("Predicted: {}", label),
//!     other => println!("{:?}", app.display(&other)),
//! }
//! ```
//!
//! # Custom Artifacts
//!
//! Any pair of types implementing [`Classifier`] and [`Vectorizer`] can be
//! served by implementing [`ArtifactSource`] for their loader.

pub mod app;
pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod messages;
pub mod terminal;

pub use app::{infer, App, RenderOutcome};
pub use artifacts::{ArtifactError, ArtifactSource, ArtifactStore, Artifacts, Fingerprint, JsonArtifactSource, LoadError};
pub use classifier::{Classifier, ClassifierError, Features, LinearClassifier, Norm, TfidfVectorizer, Vectorizer};
pub use config::{AppConfig, DEFAULT_MODEL_FILE, DEFAULT_VECTORIZER_FILE};
pub use messages::Locale;

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
