//! Shared fixtures for unit tests: a four-class linear model and a trimmed
//! NLTK data tree under `fixtures/`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::inference::InferenceEngine;
use crate::state::AppState;
use crate::text::LinguisticResources;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

pub fn model_dir() -> PathBuf {
    fixtures_dir().join("model")
}

pub fn nltk_data_dir() -> PathBuf {
    fixtures_dir().join("nltk_data")
}

pub fn fixture_resources() -> LinguisticResources {
    LinguisticResources::load(&nltk_data_dir()).expect("fixture NLTK data loads")
}

pub fn fixture_engine() -> InferenceEngine {
    InferenceEngine::load(&model_dir()).expect("fixture model loads")
}

pub fn fixture_state() -> AppState {
    AppState {
        engine: Arc::new(fixture_engine()),
        resources: Arc::new(fixture_resources()),
    }
}
