//! Inference Engine — vectorizes normalized text and returns one validated category.
//!
//! An `InferenceEngine` only exists once all three artifacts loaded and agreed
//! with each other. It is immutable afterwards and shared via `Arc` in `AppState`.

pub mod categories;
pub mod classifier;
pub mod vectorizer;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::CoreError;
use crate::inference::categories::{Category, CategorySet};
use crate::inference::classifier::{Classifier, ClassifierArtifact};
use crate::inference::vectorizer::{TfidfArtifact, TfidfVectorizer};

pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const CLASSIFIER_FILE: &str = "job_classifier.json";
pub const CATEGORIES_FILE: &str = "job_categories.json";

pub struct InferenceEngine {
    vectorizer: TfidfVectorizer,
    classifier: Box<dyn Classifier>,
    categories: CategorySet,
    /// `labels[i]` is the validated category for classifier class index `i`.
    labels: Vec<Category>,
}

impl InferenceEngine {
    /// Loads and cross-checks the vectorizer, classifier and category set in `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self, CoreError> {
        info!("Loading model artifacts from {}", model_dir.display());

        let vectorizer = TfidfVectorizer::from_artifact(
            read_artifact::<TfidfArtifact>(model_dir, VECTORIZER_FILE)?,
            VECTORIZER_FILE,
        )?;
        let classifier = read_artifact::<ClassifierArtifact>(model_dir, CLASSIFIER_FILE)?
            .into_classifier(CLASSIFIER_FILE)?;
        let categories = CategorySet::from_labels(
            read_artifact::<Vec<String>>(model_dir, CATEGORIES_FILE)?,
            CATEGORIES_FILE,
        )?;

        let engine = Self::from_parts(vectorizer, classifier, categories)?;
        info!(
            "Models loaded successfully: {} features, {} classifier ({} classes), {} categories",
            engine.vectorizer.n_features(),
            engine.classifier.kind(),
            engine.labels.len(),
            engine.categories.len()
        );
        Ok(engine)
    }

    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        classifier: Box<dyn Classifier>,
        categories: CategorySet,
    ) -> Result<Self, CoreError> {
        if classifier.n_features() != vectorizer.n_features() {
            return Err(CoreError::artifact(
                CLASSIFIER_FILE,
                format!(
                    "classifier expects {} features but the vectorizer produces {}",
                    classifier.n_features(),
                    vectorizer.n_features()
                ),
            ));
        }

        let labels = classifier
            .classes()
            .iter()
            .map(|class| {
                categories.get(class).ok_or_else(|| {
                    CoreError::artifact(
                        CATEGORIES_FILE,
                        format!("classifier class '{class}' is not a known category"),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            vectorizer,
            classifier,
            categories,
            labels,
        })
    }

    /// Classifies one normalized document.
    pub fn predict(&self, normalized_text: &str) -> Result<Category, CoreError> {
        let features = self.vectorizer.transform(normalized_text);
        let index = self.classifier.predict(&features)?;
        let category = self.labels.get(index).cloned().ok_or_else(|| {
            CoreError::Inference(format!("classifier returned unknown class index {index}"))
        })?;
        debug!(
            "Predicted '{}' from {} active features",
            category,
            features.iter().filter(|w| **w != 0.0).count()
        );
        Ok(category)
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }
}

fn read_artifact<T: DeserializeOwned>(model_dir: &Path, file: &str) -> Result<T, CoreError> {
    let path = model_dir.join(file);
    let contents = fs::read_to_string(&path)
        .map_err(|e| CoreError::artifact(file, format!("{}: {e}", path.display())))?;
    serde_json::from_str(&contents).map_err(|e| CoreError::artifact(file, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_engine, fixture_resources, model_dir};
    use crate::text::normalize;

    fn copy_fixture_model(dir: &Path) {
        for file in [VECTORIZER_FILE, CLASSIFIER_FILE, CATEGORIES_FILE] {
            fs::copy(model_dir().join(file), dir.join(file)).unwrap();
        }
    }

    #[test]
    fn test_golden_data_science_resume() {
        let engine = fixture_engine();
        let res = fixture_resources();
        let doc = "Experienced data scientist skilled in Python, machine learning, \
                   statistics and data analysis. Built predictive models.";
        let category = engine.predict(&normalize(doc, &res)).unwrap();
        assert_eq!(category.as_str(), "Data Science");
    }

    #[test]
    fn test_golden_other_categories() {
        let engine = fixture_engine();
        let res = fixture_resources();
        let cases = [
            ("Java developer with Spring and Hibernate", "Java Developer"),
            ("Recruitment, payroll and employee relations", "HR"),
            ("Web design using HTML and CSS", "Web Designing"),
        ];
        for (doc, expected) in cases {
            let category = engine.predict(&normalize(doc, &res)).unwrap();
            assert_eq!(category.as_str(), expected, "document: {doc}");
        }
    }

    #[test]
    fn test_empty_text_yields_a_category() {
        let engine = fixture_engine();
        let category = engine.predict("").unwrap();
        assert!(engine.categories().get(category.as_str()).is_some());
        // Zero vector: the largest intercept wins.
        assert_eq!(category.as_str(), "HR");
    }

    #[test]
    fn test_unknown_tokens_behave_like_empty_text() {
        let engine = fixture_engine();
        assert_eq!(
            engine.predict("cobol mainframe zzz").unwrap(),
            engine.predict("").unwrap()
        );
    }

    #[test]
    fn test_predict_is_deterministic() {
        let engine = fixture_engine();
        let text = "python data model java";
        let first = engine.predict(text).unwrap();
        for _ in 0..20 {
            assert_eq!(engine.predict(text).unwrap(), first);
        }
    }

    #[test]
    fn test_concurrent_predictions_share_one_engine() {
        let engine = fixture_engine();
        let docs = [
            "data science python machine learning",
            "java spring hibernate developer",
            "recruitment payroll employee",
            "html css web design",
        ];
        let expected: Vec<Category> = docs.iter().map(|d| engine.predict(d).unwrap()).collect();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let engine = &engine;
                let expected = &expected;
                scope.spawn(move || {
                    for _ in 0..50 {
                        for (doc, want) in docs.iter().zip(expected) {
                            assert_eq!(&engine.predict(doc).unwrap(), want);
                        }
                    }
                });
            }
        });
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InferenceEngine>();
    }

    #[test]
    fn test_missing_artifact_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        copy_fixture_model(dir.path());
        fs::remove_file(dir.path().join(CLASSIFIER_FILE)).unwrap();

        let err = InferenceEngine::load(dir.path()).err().unwrap();
        assert!(
            matches!(err, CoreError::ArtifactLoad { ref artifact, .. } if artifact == CLASSIFIER_FILE)
        );
    }

    #[test]
    fn test_corrupt_artifact_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        copy_fixture_model(dir.path());
        fs::write(dir.path().join(VECTORIZER_FILE), "{not json").unwrap();

        let err = InferenceEngine::load(dir.path()).err().unwrap();
        assert!(
            matches!(err, CoreError::ArtifactLoad { ref artifact, .. } if artifact == VECTORIZER_FILE)
        );
    }

    #[test]
    fn test_class_outside_category_set_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        copy_fixture_model(dir.path());
        fs::write(
            dir.path().join(CATEGORIES_FILE),
            r#"["Data Science", "HR", "Java Developer"]"#,
        )
        .unwrap();

        let err = InferenceEngine::load(dir.path()).err().unwrap();
        assert!(err.to_string().contains("'Web Designing' is not a known category"));
    }

    #[test]
    fn test_feature_dimension_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        copy_fixture_model(dir.path());
        fs::write(
            dir.path().join(VECTORIZER_FILE),
            r#"{"vocabulary": {"data": 0, "python": 1}}"#,
        )
        .unwrap();

        let err = InferenceEngine::load(dir.path()).err().unwrap();
        assert!(err.to_string().contains("but the vectorizer produces 2"));
    }

    #[test]
    fn test_fixture_categories_include_unpredicted_labels() {
        let engine = fixture_engine();
        assert!(engine.categories().len() > engine.labels.len());
    }
}
