use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

use crate::classifier::{Classifier, ClassifierError, LinearClassifier, TfidfVectorizer, Vectorizer};
use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to deserialize {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid artifact {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ClassifierError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Artifact files not found: {missing:?}")]
    Missing { missing: Vec<PathBuf> },
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Identity of an artifact file on disk, used to decide whether a cached
/// artifact is still current.
///
/// Only modification time and length are compared. A file rewritten with the
/// same length within one timestamp tick of the filesystem is not detected,
/// and the previously loaded artifact keeps being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

/// Where the classifier and vectorizer come from.
///
/// The store only talks to artifacts through this trait, so tests can count
/// and order calls with a stub instead of touching the filesystem.
pub trait ArtifactSource {
    type Classifier: Classifier;
    type Vectorizer: Vectorizer;

    fn exists(&self, path: &Path) -> bool;

    fn load_classifier(&self, path: &Path) -> Result<Self::Classifier, ArtifactError>;

    fn load_vectorizer(&self, path: &Path) -> Result<Self::Vectorizer, ArtifactError>;

    /// Returns `None` when the source cannot tell whether a file changed,
    /// which disables caching for that render.
    fn fingerprint(&self, _path: &Path) -> Option<Fingerprint> {
        None
    }
}

/// Reads JSON artifacts from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonArtifactSource;

impl JsonArtifactSource {
    fn open(path: &Path) -> Result<BufReader<File>, ArtifactError> {
        File::open(path)
            .map(BufReader::new)
            .map_err(|source| ArtifactError::Io { path: path.to_path_buf(), source })
    }
}

impl ArtifactSource for JsonArtifactSource {
    type Classifier = LinearClassifier;
    type Vectorizer = TfidfVectorizer;

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load_classifier(&self, path: &Path) -> Result<LinearClassifier, ArtifactError> {
        let model: LinearClassifier = serde_json::from_reader(Self::open(path)?)
            .map_err(|source| ArtifactError::Parse { path: path.to_path_buf(), source })?;
        log::info!(
            "Loaded classifier from {:?} ({} classes, {} features)",
            path,
            model.classes().len(),
            model.n_features()
        );
        Ok(model)
    }

    fn load_vectorizer(&self, path: &Path) -> Result<TfidfVectorizer, ArtifactError> {
        let vectorizer: TfidfVectorizer = serde_json::from_reader(Self::open(path)?)
            .map_err(|source| ArtifactError::Parse { path: path.to_path_buf(), source })?;
        vectorizer
            .validate()
            .map_err(|source| ArtifactError::Invalid { path: path.to_path_buf(), source })?;
        log::info!(
            "Loaded vectorizer from {:?} ({} terms)",
            path,
            vectorizer.vocabulary_size()
        );
        Ok(vectorizer)
    }

    fn fingerprint(&self, path: &Path) -> Option<Fingerprint> {
        let metadata = fs::metadata(path).ok()?;
        Some(Fingerprint {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

/// The pair of handles one render works with.
#[derive(Debug)]
pub struct Artifacts<C, V> {
    pub classifier: C,
    pub vectorizer: V,
}

struct CachedArtifacts<C, V> {
    fingerprints: (Fingerprint, Fingerprint),
    artifacts: Rc<Artifacts<C, V>>,
}

/// Checks for and loads the classifier/vectorizer pair at fixed paths.
pub struct ArtifactStore<S: ArtifactSource> {
    source: S,
    model_path: PathBuf,
    vectorizer_path: PathBuf,
    cache_enabled: bool,
    cached: Option<CachedArtifacts<S::Classifier, S::Vectorizer>>,
}

impl ArtifactStore<JsonArtifactSource> {
    /// Creates a filesystem-backed store from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(JsonArtifactSource, &config.model_path, &config.vectorizer_path)
            .with_cache(config.cache_artifacts)
    }
}

impl<S: ArtifactSource> ArtifactStore<S> {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source: S, model_path: P, vectorizer_path: Q) -> Self {
        Self {
            source,
            model_path: model_path.as_ref().to_path_buf(),
            vectorizer_path: vectorizer_path.as_ref().to_path_buf(),
            cache_enabled: false,
            cached: None,
        }
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn vectorizer_path(&self) -> &Path {
        &self.vectorizer_path
    }

    /// Paths of the artifact files that are not present, classifier first
    pub fn missing_files(&self) -> Vec<PathBuf> {
        let model_exists = self.source.exists(&self.model_path);
        let vectorizer_exists = self.source.exists(&self.vectorizer_path);
        log::info!("Checking artifacts:");
        log::info!("  Model path: {:?} (exists: {})", self.model_path, model_exists);
        log::info!("  Vectorizer path: {:?} (exists: {})", self.vectorizer_path, vectorizer_exists);

        let mut missing = Vec::new();
        if !model_exists {
            missing.push(self.model_path.clone());
        }
        if !vectorizer_exists {
            missing.push(self.vectorizer_path.clone());
        }
        missing
    }

    pub fn is_available(&self) -> bool {
        self.missing_files().is_empty()
    }

    /// Loads the classifier and then the vectorizer.
    ///
    /// Nothing is deserialized unless both files are present. With caching
    /// enabled, the previous pair is returned as long as both fingerprints are
    /// unchanged.
    pub fn load(&mut self) -> Result<Rc<Artifacts<S::Classifier, S::Vectorizer>>, LoadError> {
        let missing = self.missing_files();
        if !missing.is_empty() {
            log::warn!("Artifacts unavailable, missing: {:?}", missing);
            self.cached = None;
            return Err(LoadError::Missing { missing });
        }

        let fingerprints = if self.cache_enabled {
            self.source
                .fingerprint(&self.model_path)
                .zip(self.source.fingerprint(&self.vectorizer_path))
        } else {
            None
        };

        if let (Some(current), Some(cached)) = (fingerprints, &self.cached) {
            if cached.fingerprints == current {
                log::info!("Artifacts unchanged, reusing loaded pair");
                return Ok(Rc::clone(&cached.artifacts));
            }
        }

        let classifier = self.source.load_classifier(&self.model_path).map_err(|e| {
            log::error!("Failed to load classifier: {}", e);
            e
        })?;
        let vectorizer = self.source.load_vectorizer(&self.vectorizer_path).map_err(|e| {
            log::error!("Failed to load vectorizer: {}", e);
            e
        })?;
        let artifacts = Rc::new(Artifacts { classifier, vectorizer });

        self.cached = fingerprints.map(|fingerprints| CachedArtifacts {
            fingerprints,
            artifacts: Rc::clone(&artifacts),
        });

        Ok(artifacts)
    }
}
