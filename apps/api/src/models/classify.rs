use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inference::categories::Category;

/// Body of `/classify` and `/normalize`. `raw_text` is any JSON value;
/// non-strings normalize to an empty string.
#[derive(Debug, Deserialize)]
pub struct RawTextRequest {
    #[serde(default)]
    pub raw_text: Value,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub category: Category,
    pub normalized_text: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub normalized_text: String,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}
