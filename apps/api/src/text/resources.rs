//! English stop words and noun lemma data, read once from an NLTK data root.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::CoreError;
use crate::text::lemmatizer::Lemmatizer;

const STOPWORDS_PATH: &str = "corpora/stopwords/english";
const NOUN_INDEX_PATH: &str = "corpora/wordnet/index.noun";
const NOUN_EXCEPTIONS_PATH: &str = "corpora/wordnet/noun.exc";

/// Immutable linguistic data shared by every `normalize` call.
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    stopwords: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl LinguisticResources {
    pub fn new(stopwords: HashSet<String>, lemmatizer: Lemmatizer) -> Self {
        Self {
            stopwords,
            lemmatizer,
        }
    }

    /// Loads stop words and WordNet noun data from `data_dir`.
    ///
    /// Layout mirrors an unpacked NLTK download:
    /// `corpora/stopwords/english`, `corpora/wordnet/index.noun`,
    /// `corpora/wordnet/noun.exc`.
    pub fn load(data_dir: &Path) -> Result<Self, CoreError> {
        let stopwords: HashSet<String> = read_resource(data_dir, STOPWORDS_PATH)?
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        if stopwords.is_empty() {
            return Err(CoreError::resource(STOPWORDS_PATH, "stop-word list is empty"));
        }

        let lexicon = Lemmatizer::parse_index(&read_resource(data_dir, NOUN_INDEX_PATH)?);
        if lexicon.is_empty() {
            return Err(CoreError::resource(NOUN_INDEX_PATH, "noun index is empty"));
        }
        let exceptions =
            Lemmatizer::parse_exceptions(&read_resource(data_dir, NOUN_EXCEPTIONS_PATH)?);

        info!(
            "Linguistic resources loaded: {} stop words, {} noun lemmas, {} noun exceptions",
            stopwords.len(),
            lexicon.len(),
            exceptions.len()
        );

        Ok(Self::new(stopwords, Lemmatizer::new(lexicon, exceptions)))
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn lemmatize(&self, word: &str) -> String {
        self.lemmatizer.lemmatize(word)
    }
}

fn read_resource(data_dir: &Path, relative: &str) -> Result<String, CoreError> {
    let path: PathBuf = data_dir.join(relative);
    fs::read_to_string(&path).map_err(|e| CoreError::resource(path.display().to_string(), e))
}
