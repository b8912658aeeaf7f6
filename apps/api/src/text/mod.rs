// Text normalization: noise stripping, stop-word removal, noun lemmatization.
// Stop words and lemma data come from `LinguisticResources`, loaded once at startup.

pub mod lemmatizer;
pub mod normalizer;
pub mod resources;

pub use normalizer::{normalize, normalize_value};
pub use resources::LinguisticResources;
