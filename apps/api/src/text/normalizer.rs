//! Resume text normalizer.
//!
//! The step order below is the order the classifier's training corpus was
//! cleaned with. Reordering changes the output.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::text::resources::LinguisticResources;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("bracket pattern is valid"));
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("url pattern is valid"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>+").expect("tag pattern is valid"));
static DIGIT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w*\d\w*").expect("digit word pattern is valid"));

/// Normalizes an arbitrary JSON value. Anything but a string yields `""`.
pub fn normalize_value(raw: &Value, resources: &LinguisticResources) -> String {
    match raw {
        Value::String(text) => normalize(text, resources),
        _ => String::new(),
    }
}

/// Lowercases, strips noise, drops stop words and lemmatizes what is left.
///
/// 1. lowercase
/// 2. drop `[...]` spans
/// 3. drop `http://`, `https://` and `www.` runs
/// 4. drop `<...>` tags
/// 5. drop ASCII punctuation
/// 6. drop newlines
/// 7. drop every word run containing a digit
/// 8. split, drop stop words, lemmatize, join with single spaces
pub fn normalize(text: &str, resources: &LinguisticResources) -> String {
    let text = text.to_lowercase();
    let text = BRACKETED.replace_all(&text, "");
    let text = URL.replace_all(&text, "");
    let text = HTML_TAG.replace_all(&text, "");
    let text: String = text
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && *c != '\n')
        .collect();
    let text = DIGIT_WORD.replace_all(&text, "");

    text.split(is_separator)
        .filter(|word| !word.is_empty() && !resources.is_stopword(word))
        .map(|word| resources.lemmatize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
