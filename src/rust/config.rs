use std::path::{Path, PathBuf};

use crate::messages::Locale;

/// File name of the serialized classifier, relative to the project root
pub const DEFAULT_MODEL_FILE: &str = "model.json";
/// File name of the serialized vectorizer, relative to the project root
pub const DEFAULT_VECTORIZER_FILE: &str = "vectorizer.json";

/// Everything the front-end needs to know before the first render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub locale: Locale,
    /// Reuse loaded artifacts across renders while the files are unchanged
    pub cache_artifacts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl AppConfig {
    /// Default configuration with both artifacts expected in `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            model_path: dir.join(DEFAULT_MODEL_FILE),
            vectorizer_path: dir.join(DEFAULT_VECTORIZER_FILE),
            locale: Locale::default(),
            cache_artifacts: false,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_cache(mut self, cache_artifacts: bool) -> Self {
        self.cache_artifacts = cache_artifacts;
        self
    }
}
