use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use ndarray::array;
use pretty_assertions::assert_eq;

use sentimento::{
    App, ArtifactError, ArtifactSource, ArtifactStore, Classifier, ClassifierError, Features,
    Fingerprint, Locale, RenderOutcome, Vectorizer,
};

const MODEL_PATH: &str = "./model.json";
const VECTOR_PATH: &str = "./vectorizer.json";

#[derive(Debug, Clone, PartialEq)]
enum Call {
    LoadClassifier(PathBuf),
    LoadVectorizer(PathBuf),
    Transform(Vec<String>),
    Predict(Features),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

struct StubVectorizer {
    log: CallLog,
}

impl Vectorizer for StubVectorizer {
    fn transform(&self, documents: &[&str]) -> Result<Features, ClassifierError> {
        self.log
            .borrow_mut()
            .push(Call::Transform(documents.iter().map(|d| d.to_string()).collect()));
        Ok(array![[0.25, 0.75]])
    }
}

struct StubClassifier {
    log: CallLog,
    result: Result<Vec<String>, ClassifierError>,
}

impl Classifier for StubClassifier {
    fn predict(&self, features: &Features) -> Result<Vec<String>, ClassifierError> {
        self.log.borrow_mut().push(Call::Predict(features.clone()));
        self.result.clone()
    }
}

struct StubSource {
    log: CallLog,
    present: HashSet<PathBuf>,
    prediction: Result<Vec<String>, ClassifierError>,
    corrupt_model: bool,
    fingerprint: Option<Fingerprint>,
}

impl StubSource {
    fn new(present: &[&str]) -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            present: present.iter().map(PathBuf::from).collect(),
            prediction: Ok(vec!["positive".to_string()]),
            corrupt_model: false,
            fingerprint: None,
        }
    }

    fn with_prediction(mut self, prediction: Result<Vec<String>, ClassifierError>) -> Self {
        self.prediction = prediction;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }
}

impl ArtifactSource for StubSource {
    type Classifier = StubClassifier;
    type Vectorizer = StubVectorizer;

    fn exists(&self, path: &Path) -> bool {
        self.present.contains(path)
    }

    fn load_classifier(&self, path: &Path) -> Result<StubClassifier, ArtifactError> {
        self.log.borrow_mut().push(Call::LoadClassifier(path.to_path_buf()));
        if self.corrupt_model {
            let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
            return Err(ArtifactError::Parse { path: path.to_path_buf(), source });
        }
        Ok(StubClassifier {
            log: Rc::clone(&self.log),
            result: self.prediction.clone(),
        })
    }

    fn load_vectorizer(&self, path: &Path) -> Result<StubVectorizer, ArtifactError> {
        self.log.borrow_mut().push(Call::LoadVectorizer(path.to_path_buf()));
        Ok(StubVectorizer { log: Rc::clone(&self.log) })
    }

    fn fingerprint(&self, _path: &Path) -> Option<Fingerprint> {
        self.fingerprint
    }
}

fn setup_app(source: StubSource) -> App<StubSource> {
    App::new(ArtifactStore::new(source, MODEL_PATH, VECTOR_PATH), Locale::Pt)
}

fn calls(app: &App<StubSource>) -> Vec<Call> {
    app.store().source().calls()
}

fn count(calls: &[Call], pred: impl Fn(&Call) -> bool) -> usize {
    calls.iter().filter(|c| pred(c)).count()
}

#[test]
fn test_missing_artifacts_never_load_or_infer() {
    let cases: [&[&str]; 3] = [&[], &[MODEL_PATH], &[VECTOR_PATH]];
    for present in cases {
        let mut app = setup_app(StubSource::new(present));
        for (input, submitted) in [("test tweet", true), ("", true), ("test tweet", false)] {
            assert_eq!(app.render(input, submitted), RenderOutcome::Unavailable);
        }
        assert!(calls(&app).is_empty(), "nothing may be loaded when {:?} are present", present);
    }
}

#[test]
fn test_missing_artifacts_message() {
    let mut app = setup_app(StubSource::new(&[]));
    let outcome = app.render("test tweet", true);
    let message = app.display(&outcome).unwrap();
    assert!(message.contains("não foram encontrados"));
}

#[test]
fn test_no_action_is_idle() {
    let mut app = setup_app(StubSource::new(&[MODEL_PATH, VECTOR_PATH]));
    let outcome = app.render("This is a happy tweet", false);
    assert_eq!(outcome, RenderOutcome::Idle);
    assert_eq!(app.display(&outcome), None);

    let calls = calls(&app);
    assert_eq!(count(&calls, |c| matches!(c, Call::Transform(_))), 0);
    assert_eq!(count(&calls, |c| matches!(c, Call::Predict(_))), 0);
}

#[test]
fn test_blank_input_warns_without_inference() {
    let mut app = setup_app(StubSource::new(&[MODEL_PATH, VECTOR_PATH]));
    for input in ["", " ", "\t", "   \t  ", "\u{3000}"] {
        let outcome = app.render(input, true);
        assert_eq!(outcome, RenderOutcome::Warning);
        assert_eq!(
            app.display(&outcome).as_deref(),
            Some("Por favor, insira um texto para análise.")
        );
    }

    let calls = calls(&app);
    assert_eq!(count(&calls, |c| matches!(c, Call::Transform(_))), 0);
    assert_eq!(count(&calls, |c| matches!(c, Call::Predict(_))), 0);
}

#[test]
fn test_successful_analysis() {
    let mut app = setup_app(StubSource::new(&[MODEL_PATH, VECTOR_PATH]));
    let outcome = app.render("This is a happy tweet", true);
    assert_eq!(outcome, RenderOutcome::Success("positive".to_string()));
    assert_eq!(app.display(&outcome).as_deref(), Some("Sentimento: positive"));

    assert_eq!(
        calls(&app),
        vec![
            Call::LoadClassifier(PathBuf::from(MODEL_PATH)),
            Call::LoadVectorizer(PathBuf::from(VECTOR_PATH)),
            Call::Transform(vec!["This is a happy tweet".to_string()]),
            Call::Predict(array![[0.25, 0.75]]),
        ]
    );
}

#[test]
fn test_untrimmed_text_reaches_vectorizer() {
    let mut app = setup_app(StubSource::new(&[MODEL_PATH, VECTOR_PATH]));
    app.render("  padded tweet \t", true);
    let calls = calls(&app);
    assert!(calls.contains(&Call::Transform(vec!["  padded tweet \t".to_string()])));
}

#[test]
fn test_first_label_is_shown() {
    let source = StubSource::new(&[MODEL_PATH, VECTOR_PATH])
        .with_prediction(Ok(vec!["negative".to_string(), "positive".to_string()]));
    let mut app = setup_app(source);
    assert_eq!(app.render("meh", true), RenderOutcome::Success("negative".to_string()));
}

#[test]
fn test_model_loading_order() {
    let mut app = setup_app(StubSource::new(&[MODEL_PATH, VECTOR_PATH]));
    app.render("", false);
    app.render("a tweet", true);

    let loads: Vec<Call> = calls(&app)
        .into_iter()
        .filter(|c| matches!(c, Call::LoadClassifier(_) | Call::LoadVectorizer(_)))
        .collect();
    assert_eq!(
        loads,
        vec![
            Call::LoadClassifier(PathBuf::from(MODEL_PATH)),
            Call::LoadVectorizer(PathBuf::from(VECTOR_PATH)),
            Call::LoadClassifier(PathBuf::from(MODEL_PATH)),
            Call::LoadVectorizer(PathBuf::from(VECTOR_PATH)),
        ]
    );
}

#[test]
fn test_each_action_recomputes() {
    let mut app = setup_app(StubSource::new(&[MODEL_PATH, VECTOR_PATH]));
    app.render("same tweet", true);
    app.render("same tweet", true);
    let calls = calls(&app);
    assert_eq!(count(&calls, |c| matches!(c, Call::Transform(_))), 2);
    assert_eq!(count(&calls, |c| matches!(c, Call::Predict(_))), 2);
}

#[test]
fn test_inference_fault_is_reported() {
    let source = StubSource::new(&[MODEL_PATH, VECTOR_PATH]).with_prediction(Err(
        ClassifierError::DimensionMismatch { expected: 10, actual: 2 },
    ));
    let mut app = setup_app(source);
    let outcome = app.render("a tweet", true);
    match &outcome {
        RenderOutcome::Fault(details) => assert!(details.contains("mismatch")),
        other => panic!("expected a fault, got {:?}", other),
    }
    assert!(app.display(&outcome).unwrap().starts_with("Falha ao analisar o texto"));
}

#[test]
fn test_empty_prediction_is_a_fault() {
    let source = StubSource::new(&[MODEL_PATH, VECTOR_PATH]).with_prediction(Ok(vec![]));
    let mut app = setup_app(source);
    assert!(matches!(app.render("a tweet", true), RenderOutcome::Fault(_)));
}

#[test]
fn test_corrupt_artifact_is_a_fault() {
    let mut source = StubSource::new(&[MODEL_PATH, VECTOR_PATH]);
    source.corrupt_model = true;
    let mut app = setup_app(source);

    assert!(matches!(app.render("a tweet", true), RenderOutcome::Fault(_)));
    let calls = calls(&app);
    assert_eq!(calls, vec![Call::LoadClassifier(PathBuf::from(MODEL_PATH))]);
}

#[test]
fn test_cache_reuses_artifacts_while_fingerprint_is_stable() {
    let mut source = StubSource::new(&[MODEL_PATH, VECTOR_PATH]);
    source.fingerprint = Some(Fingerprint { modified: None, len: 42 });
    let store = ArtifactStore::new(source, MODEL_PATH, VECTOR_PATH).with_cache(true);
    let mut app = App::new(store, Locale::En);

    assert_eq!(app.render("good", true), RenderOutcome::Success("positive".to_string()));
    assert_eq!(app.render("good", true), RenderOutcome::Success("positive".to_string()));

    let calls = calls(&app);
    assert_eq!(count(&calls, |c| matches!(c, Call::LoadClassifier(_))), 1);
    assert_eq!(count(&calls, |c| matches!(c, Call::LoadVectorizer(_))), 1);
    assert_eq!(count(&calls, |c| matches!(c, Call::Predict(_))), 2);
}

#[test]
fn test_cache_needs_fingerprints() {
    let store = ArtifactStore::new(StubSource::new(&[MODEL_PATH, VECTOR_PATH]), MODEL_PATH, VECTOR_PATH)
        .with_cache(true);
    let mut app = App::new(store, Locale::Pt);
    app.render("good", true);
    app.render("good", true);
    let calls = calls(&app);
    assert_eq!(count(&calls, |c| matches!(c, Call::LoadClassifier(_))), 2);
}

#[test]
fn test_english_locale() {
    let store = ArtifactStore::new(StubSource::new(&[MODEL_PATH, VECTOR_PATH]), MODEL_PATH, VECTOR_PATH);
    let mut app = App::new(store, Locale::En);
    let outcome = app.render("This is a happy tweet", true);
    assert_eq!(app.display(&outcome).as_deref(), Some("Sentiment: positive"));
    let outcome = app.render("", true);
    assert_eq!(app.display(&outcome).as_deref(), Some("Please enter text to analyze."));
}
