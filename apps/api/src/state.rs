use std::sync::Arc;

use crate::inference::InferenceEngine;
use crate::text::LinguisticResources;

/// Shared application state injected into all route handlers via Axum extractors.
/// Both members are loaded once in `main` and never mutated, so no locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<InferenceEngine>,
    pub resources: Arc<LinguisticResources>,
}
