//! Classifier — trait-based, so the engine is indifferent to which fitted model
//! family produced `job_classifier.json`.
//!
//! `ClassifierArtifact` is the tagged on-disk shape; `into_classifier` validates
//! it and returns a `Box<dyn Classifier>` for the engine to own.

use serde::Deserialize;

use crate::errors::CoreError;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A fitted, read-only classifier over dense feature rows.
pub trait Classifier: Send + Sync {
    /// Index into `classes()` of the top-scoring class for `features`.
    fn predict(&self, features: &[f64]) -> Result<usize, CoreError>;

    /// Class labels in model order.
    fn classes(&self) -> &[String];

    fn n_features(&self) -> usize;

    /// Short backend name, for logs.
    fn kind(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Linear(LinearClassifier),
    MultinomialNb(MultinomialNb),
}

impl ClassifierArtifact {
    pub fn into_classifier(self, artifact: &str) -> Result<Box<dyn Classifier>, CoreError> {
        match self {
            ClassifierArtifact::Linear(model) => {
                model.validate(artifact)?;
                Ok(Box::new(model))
            }
            ClassifierArtifact::MultinomialNb(model) => {
                model.validate(artifact)?;
                Ok(Box::new(model))
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LinearClassifier — logistic regression, linear SVM, SGD exports
// ────────────────────────────────────────────────────────────────────────────

/// `decision = coef · x + intercept`.
///
/// Binary models carry a single coefficient row; a positive decision picks
/// `classes[1]`, anything else `classes[0]`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    /// Missing or empty means no intercept.
    #[serde(default)]
    pub intercept: Vec<f64>,
}

impl LinearClassifier {
    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coef.len() == 1
    }

    fn validate(&self, artifact: &str) -> Result<(), CoreError> {
        validate_classes(&self.classes, artifact)?;
        if self.coef.len() != self.classes.len() && !self.is_binary() {
            return Err(CoreError::artifact(
                artifact,
                format!(
                    "coef has {} rows for {} classes",
                    self.coef.len(),
                    self.classes.len()
                ),
            ));
        }
        if !self.intercept.is_empty() && self.intercept.len() != self.coef.len() {
            return Err(CoreError::artifact(
                artifact,
                format!(
                    "intercept has {} entries for {} coef rows",
                    self.intercept.len(),
                    self.coef.len()
                ),
            ));
        }
        validate_matrix(&self.coef, "coef", artifact)
    }

    fn decision(&self, features: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .enumerate()
            .map(|(row, weights)| {
                dot(weights, features) + self.intercept.get(row).copied().unwrap_or(0.0)
            })
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &[f64]) -> Result<usize, CoreError> {
        check_width(features, self.n_features())?;
        let scores = self.decision(features);
        if self.is_binary() {
            let score = scores[0];
            if !score.is_finite() {
                return Err(CoreError::Inference(format!(
                    "non-finite decision value {score}"
                )));
            }
            return Ok(usize::from(score > 0.0));
        }
        argmax(&scores)
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MultinomialNb
// ────────────────────────────────────────────────────────────────────────────

/// `jll = x · feature_log_prob + class_log_prior`.
#[derive(Debug, Clone, Deserialize)]
pub struct MultinomialNb {
    pub classes: Vec<String>,
    pub feature_log_prob: Vec<Vec<f64>>,
    pub class_log_prior: Vec<f64>,
}

impl MultinomialNb {
    fn validate(&self, artifact: &str) -> Result<(), CoreError> {
        validate_classes(&self.classes, artifact)?;
        let n_classes = self.classes.len();
        if self.feature_log_prob.len() != n_classes || self.class_log_prior.len() != n_classes {
            return Err(CoreError::artifact(
                artifact,
                format!(
                    "expected {n_classes} rows, got feature_log_prob={} class_log_prior={}",
                    self.feature_log_prob.len(),
                    self.class_log_prior.len()
                ),
            ));
        }
        validate_matrix(&self.feature_log_prob, "feature_log_prob", artifact)
    }
}

impl Classifier for MultinomialNb {
    fn predict(&self, features: &[f64]) -> Result<usize, CoreError> {
        check_width(features, self.n_features())?;
        let jll: Vec<f64> = self
            .feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(log_probs, prior)| dot(log_probs, features) + prior)
            .collect();
        argmax(&jll)
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn kind(&self) -> &'static str {
        "multinomial_nb"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_classes(classes: &[String], artifact: &str) -> Result<(), CoreError> {
    if classes.len() < 2 {
        return Err(CoreError::artifact(
            artifact,
            format!("need at least 2 classes, got {}", classes.len()),
        ));
    }
    Ok(())
}

fn validate_matrix(rows: &[Vec<f64>], name: &str, artifact: &str) -> Result<(), CoreError> {
    let width = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(CoreError::artifact(artifact, format!("{name} has no features")));
    }
    if let Some(row) = rows.iter().position(|r| r.len() != width) {
        return Err(CoreError::artifact(
            artifact,
            format!("{name} row {row} has {} features, expected {width}", rows[row].len()),
        ));
    }
    Ok(())
}

fn check_width(features: &[f64], expected: usize) -> Result<(), CoreError> {
    if features.len() != expected {
        return Err(CoreError::Inference(format!(
            "feature vector has {} dimensions, model expects {expected}",
            features.len()
        )));
    }
    Ok(())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// First index of the maximum. Non-finite scores are an inference failure.
fn argmax(scores: &[f64]) -> Result<usize, CoreError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() {
            return Err(CoreError::Inference(format!(
                "non-finite score {score} for class index {i}"
            )));
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
        .ok_or_else(|| CoreError::Inference("model produced no scores".to_string()))
}
