//! Dictionary-backed noun lemmatizer following WordNet's `morphy` procedure.

use std::collections::{HashMap, HashSet};

/// Noun detachment rules, tried in this order on every form.
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    /// Known noun base forms.
    lexicon: HashSet<String>,
    /// Irregular inflections: inflected form -> base forms.
    exceptions: HashMap<String, Vec<String>>,
    /// Byte length of the longest lexicon entry.
    max_len: usize,
}

impl Lemmatizer {
    pub fn new(lexicon: HashSet<String>, exceptions: HashMap<String, Vec<String>>) -> Self {
        let max_len = lexicon.iter().map(String::len).max().unwrap_or(0);
        Self {
            lexicon,
            exceptions,
            max_len,
        }
    }

    /// Parses a WordNet `index.noun` file. Header lines start with a space.
    pub fn parse_index(contents: &str) -> HashSet<String> {
        contents
            .lines()
            .filter(|line| !line.starts_with(' '))
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    /// Parses a WordNet `noun.exc` file: `inflected base [base...]` per line.
    /// A repeated inflected form replaces the earlier entry.
    pub fn parse_exceptions(contents: &str) -> HashMap<String, Vec<String>> {
        let mut map = HashMap::new();
        for line in contents.lines() {
            let mut fields = line.split_whitespace();
            let Some(inflected) = fields.next() else {
                continue;
            };
            map.insert(inflected.to_string(), fields.map(str::to_string).collect());
        }
        map
    }

    /// Returns the shortest known base form of `word`, or `word` itself when
    /// the lexicon knows none.
    pub fn lemmatize(&self, word: &str) -> String {
        self.morphy(word)
            .into_iter()
            .min_by_key(|form| form.chars().count())
            .unwrap_or_else(|| word.to_string())
    }

    fn morphy(&self, word: &str) -> Vec<String> {
        if let Some(bases) = self.exceptions.get(word) {
            let candidates: Vec<Form> = std::iter::once(word)
                .chain(bases.iter().map(String::as_str))
                .map(Form::whole)
                .collect();
            return self.filter_forms(&candidates);
        }

        let word = Form::whole(word);
        let mut forms = apply_rules(std::slice::from_ref(&word));
        let results = self.filter_forms(std::iter::once(&word).chain(&forms));
        if !results.is_empty() {
            return results;
        }

        // Keep detaching until something is known or no rule applies.
        while !forms.is_empty() {
            forms = apply_rules(&forms);
            let results = self.filter_forms(&forms);
            if !results.is_empty() {
                return results;
            }
        }

        Vec::new()
    }

    /// Keeps forms present in the lexicon, first occurrence order, deduplicated.
    fn filter_forms<'a: 'f, 'f>(
        &self,
        forms: impl IntoIterator<Item = &'f Form<'a>>,
    ) -> Vec<String> {
        let mut seen = HashSet::new();
        forms
            .into_iter()
            .filter(|form| form.len() <= self.max_len)
            .map(Form::render)
            .filter(|form| self.lexicon.contains(form))
            .filter(|form| seen.insert(form.clone()))
            .collect()
    }
}

/// A candidate base form: a prefix of the input word followed by the
/// replacement written by the last rule. The tail is at most a few bytes.
#[derive(Debug, Clone)]
struct Form<'a> {
    stem: &'a str,
    tail: String,
}

impl<'a> Form<'a> {
    fn whole(word: &'a str) -> Self {
        Self {
            stem: word,
            tail: String::new(),
        }
    }

    fn len(&self) -> usize {
        self.stem.len() + self.tail.len()
    }

    fn ends_with(&self, suffix: &str) -> bool {
        if suffix.len() <= self.tail.len() {
            return self.tail.ends_with(suffix);
        }
        let (head, rest) = suffix.split_at(suffix.len() - self.tail.len());
        rest == self.tail && self.stem.ends_with(head)
    }

    /// Replaces `suffix` with `replacement`. The form must end with `suffix`.
    fn detach(&self, suffix: &str, replacement: &str) -> Self {
        if suffix.len() <= self.tail.len() {
            let mut tail = self.tail[..self.tail.len() - suffix.len()].to_string();
            tail.push_str(replacement);
            return Self {
                stem: self.stem,
                tail,
            };
        }
        let cut = suffix.len() - self.tail.len();
        Self {
            stem: &self.stem[..self.stem.len() - cut],
            tail: replacement.to_string(),
        }
    }

    fn render(&self) -> String {
        format!("{}{}", self.stem, self.tail)
    }
}

fn apply_rules<'a>(forms: &[Form<'a>]) -> Vec<Form<'a>> {
    forms
        .iter()
        .flat_map(|form| {
            NOUN_RULES
                .iter()
                .filter(move |(suffix, _)| form.ends_with(suffix))
                .map(move |(suffix, replacement)| form.detach(suffix, replacement))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn lemmatizer() -> Lemmatizer {
        let lexicon = Lemmatizer::parse_index(
            "  1 This software and database is being provided\n\
             analysis n 1 1 @ 1 0 00634276\n\
             box n 1 1 @ 1 0 02883344\n\
             child n 1 1 @ 1 0 09917593\n\
             company n 1 1 @ 1 0 08058098\n\
             glass n 1 1 @ 1 0 14881303\n\
             glasses n 1 1 @ 1 0 04272054\n\
             woman n 1 1 @ 1 0 10787470\n\
             wolf n 1 1 @ 1 0 02114100\n\
             year n 1 1 @ 1 0 15203791\n",
        );
        let exceptions = Lemmatizer::parse_exceptions(
            "analyses analysis\nchildren child\nmice mouse\n",
        );
        Lemmatizer::new(lexicon, exceptions)
    }

    #[test]
    fn test_index_header_lines_are_skipped() {
        let lexicon = Lemmatizer::parse_index("  1 license text\nyear n 1\n");
        assert_eq!(lexicon.len(), 1);
        assert!(lexicon.contains("year"));
    }

    #[test]
    fn test_repeated_exception_replaces_earlier_entry() {
        let exc = Lemmatizer::parse_exceptions("axes ax axis\n\naxes axe\nmice mouse\n");
        assert_eq!(exc["axes"], vec!["axe"]);
        assert_eq!(exc["mice"], vec!["mouse"]);
    }

    #[test]
    fn test_regular_plural() {
        assert_eq!(lemmatizer().lemmatize("years"), "year");
    }

    #[test]
    fn test_suffix_rules() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("boxes"), "box");
        assert_eq!(lem.lemmatize("companies"), "company");
        assert_eq!(lem.lemmatize("wolves"), "wolf");
        assert_eq!(lem.lemmatize("women"), "woman");
    }

    #[test]
    fn test_rules_chain_across_passes() {
        let lem = lemmatizer();
        // years -> year on the second pass.
        assert_eq!(lem.lemmatize("yearss"), "year");
        // boxeses -> boxes -> box, where "xes" spans a rewritten suffix.
        assert_eq!(lem.lemmatize("boxeses"), "box");
    }

    #[test]
    fn test_long_token_detaches_in_linear_time() {
        let word = "s".repeat(200_000);
        let started = Instant::now();
        assert_eq!(lemmatizer().lemmatize(&word), word);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_exception_list_wins() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("analyses"), "analysis");
        assert_eq!(lem.lemmatize("children"), "child");
    }

    #[test]
    fn test_exception_with_unknown_base_returns_word() {
        // "mouse" is not in the lexicon, so no candidate survives.
        assert_eq!(lemmatizer().lemmatize("mice"), "mice");
    }

    #[test]
    fn test_shortest_candidate_is_chosen() {
        // Both "glasses" and "glass" are known nouns.
        assert_eq!(lemmatizer().lemmatize("glasses"), "glass");
    }

    #[test]
    fn test_known_base_form_is_unchanged() {
        assert_eq!(lemmatizer().lemmatize("analysis"), "analysis");
    }

    #[test]
    fn test_unknown_word_is_unchanged() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("kubernetes"), "kubernetes");
        assert_eq!(lem.lemmatize("bold"), "bold");
    }
}
