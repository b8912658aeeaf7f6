use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::errors::CoreError;

/// A job category label known to be a member of the loaded `CategorySet`.
///
/// The only constructor is `CategorySet::get`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The finite label universe loaded from `job_categories.json`, in file order.
#[derive(Debug, Clone)]
pub struct CategorySet {
    labels: Vec<Category>,
}

impl CategorySet {
    pub fn from_labels(labels: Vec<String>, artifact: &str) -> Result<Self, CoreError> {
        if labels.is_empty() {
            return Err(CoreError::artifact(artifact, "category list is empty"));
        }

        {
            let mut seen = HashSet::new();
            for label in &labels {
                if label.trim().is_empty() {
                    return Err(CoreError::artifact(
                        artifact,
                        "category list contains a blank label",
                    ));
                }
                if !seen.insert(label.as_str()) {
                    return Err(CoreError::artifact(
                        artifact,
                        format!("category '{label}' is listed twice"),
                    ));
                }
            }
        }

        Ok(Self {
            labels: labels.into_iter().map(Category).collect(),
        })
    }

    /// Returns the validated category for `label`, if it is a member.
    pub fn get(&self, label: &str) -> Option<Category> {
        self.labels.iter().find(|c| c.0 == label).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}
