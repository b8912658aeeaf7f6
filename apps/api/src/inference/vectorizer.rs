//! Fitted TF-IDF vectorizer.
//!
//! Reproduces `transform` of a scikit-learn `TfidfVectorizer` exported as JSON.
//! Fitting happens elsewhere; this type only ever reads its parameters.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::CoreError;

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
}

/// On-disk shape of `tfidf_vectorizer.json`.
#[derive(Debug, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub binary: bool,
    /// Only `"word"` is supported.
    #[serde(default = "default_analyzer")]
    pub analyzer: String,
    /// Only `null` is supported, as for `stop_words`.
    #[serde(default)]
    pub strip_accents: Option<String>,
    #[serde(default)]
    pub stop_words: Value,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_analyzer() -> String {
    "word".to_string()
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    norm: Option<Norm>,
    sublinear_tf: bool,
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    binary: bool,
}

impl TfidfVectorizer {
    /// Validates an exported vectorizer. `artifact` names the source file in errors.
    pub fn from_artifact(raw: TfidfArtifact, artifact: &str) -> Result<Self, CoreError> {
        let n_features = raw.vocabulary.len();
        if n_features == 0 {
            return Err(CoreError::artifact(artifact, "vocabulary is empty"));
        }

        let mut seen = vec![false; n_features];
        for (term, &index) in &raw.vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(CoreError::artifact(
                        artifact,
                        format!("vocabulary index {index} is assigned twice (term '{term}')"),
                    ))
                }
                None => {
                    return Err(CoreError::artifact(
                        artifact,
                        format!("vocabulary index {index} for '{term}' is out of range 0..{n_features}"),
                    ))
                }
            }
        }

        if let Some(idf) = &raw.idf {
            if idf.len() != n_features {
                return Err(CoreError::artifact(
                    artifact,
                    format!("idf has {} entries, vocabulary has {n_features}", idf.len()),
                ));
            }
            if idf.iter().any(|v| !v.is_finite()) {
                return Err(CoreError::artifact(artifact, "idf contains non-finite values"));
            }
        }

        let (min_n, max_n) = raw.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(CoreError::artifact(
                artifact,
                format!("invalid ngram_range [{min_n}, {max_n}]"),
            ));
        }

        // Term-altering settings that transform does not implement.
        if raw.analyzer != "word" {
            return Err(CoreError::artifact(
                artifact,
                format!("unsupported analyzer '{}'", raw.analyzer),
            ));
        }
        if let Some(mode) = &raw.strip_accents {
            return Err(CoreError::artifact(
                artifact,
                format!("unsupported strip_accents '{mode}'"),
            ));
        }
        if !raw.stop_words.is_null() {
            return Err(CoreError::artifact(
                artifact,
                "vectorizer-level stop_words are not supported",
            ));
        }

        let token_pattern = Regex::new(&raw.token_pattern)
            .map_err(|e| CoreError::artifact(artifact, format!("invalid token_pattern: {e}")))?;

        Ok(Self {
            vocabulary: raw.vocabulary,
            idf: raw.idf,
            norm: raw.norm,
            sublinear_tf: raw.sublinear_tf,
            lowercase: raw.lowercase,
            token_pattern,
            ngram_range: raw.ngram_range,
            binary: raw.binary,
        })
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Maps one document to a dense row of `n_features` weights.
    /// Terms outside the vocabulary contribute nothing.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0_f64; self.n_features()];

        for term in self.analyze(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                row[index] += 1.0;
            }
        }

        if self.binary {
            for tf in row.iter_mut().filter(|tf| **tf > 0.0) {
                *tf = 1.0;
            }
        }

        if self.sublinear_tf {
            for tf in row.iter_mut().filter(|tf| **tf > 0.0) {
                *tf = tf.ln() + 1.0;
            }
        }

        if let Some(idf) = &self.idf {
            for (tf, weight) in row.iter_mut().zip(idf) {
                *tf *= weight;
            }
        }

        let norm = match self.norm {
            Some(Norm::L2) => row.iter().map(|x| x * x).sum::<f64>().sqrt(),
            Some(Norm::L1) => row.iter().map(|x| x.abs()).sum::<f64>(),
            None => return row,
        };
        if norm > 0.0 {
            for x in row.iter_mut() {
                *x /= norm;
            }
        }

        row
    }

    /// Tokens followed by word n-grams, in the order scikit-learn emits them.
    fn analyze(&self, document: &str) -> Vec<String> {
        let document = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&document)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        if max_n == 1 {
            return tokens.into_iter().map(str::to_string).collect();
        }

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }
}
