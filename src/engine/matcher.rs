//! Phrase presence over normalized text.
//!
//! Matching is recall-oriented: a phrase is split into words and counts as
//! present when *every* word occurs somewhere in the text as a substring.
//! Word adjacency and order are ignored, so "nao resolveu" is present in
//! "resolveu o problema? nao". Single-word phrases reduce to plain substring
//! presence.
//!
//! Both sides are expected to be normalized already (see `normalize.rs`).

/// A lexicon phrase pre-split into its words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Normalized phrase, as listed in the lexicon.
    pub text: String,
    /// `text` split on whitespace.
    pub words: Vec<String>,
}

impl Phrase {
    pub fn new(normalized: String) -> Self {
        let words = normalized.split_whitespace().map(str::to_string).collect();
        Phrase { text: normalized, words }
    }

    /// True when every word of the phrase occurs in `haystack`.
    pub fn is_present_in(&self, haystack: &str) -> bool {
        !self.words.is_empty() && self.words.iter().all(|w| haystack.contains(w.as_str()))
    }
}

/// Phrases from `phrases` present in `haystack`, in lexicon order.
///
/// Each phrase appears at most once regardless of how often it repeats.
pub fn present<'p>(phrases: &'p [Phrase], haystack: &str) -> Vec<&'p Phrase> {
    phrases.iter().filter(|p| p.is_present_in(haystack)).collect()
}

/// True when any of `needles` is a substring of `haystack`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(list: &[&str]) -> Vec<Phrase> {
        list.iter().map(|s| Phrase::new(s.to_string())).collect()
    }

    #[test]
    fn single_word_is_substring() {
        let p = Phrase::new("eficiente".to_string());
        assert!(p.is_present_in("super eficiente!"));
        assert!(p.is_present_in("ineficientes"));
        assert!(!p.is_present_in("eficaz"));
    }

    #[test]
    fn multi_word_ignores_order_and_adjacency() {
        let p = Phrase::new("nao resolveu".to_string());
        assert!(p.is_present_in("nao sei se resolveu"));
        assert!(p.is_present_in("resolveu? nao"));
        assert!(!p.is_present_in("resolveu tudo"));
    }

    #[test]
    fn repeated_phrase_counts_once() {
        let list = phrases(&["ok", "muito bom"]);
        assert_eq!(present(&list, "ok ok ok, muito muito bom bom").len(), 2);
        assert!(present(&list, "").is_empty());
    }

    #[test]
    fn present_keeps_lexicon_order() {
        let list = phrases(&["rapidez", "qualidade", "perfeito"]);
        let hits: Vec<&str> =
            present(&list, "perfeito, com qualidade").iter().map(|p| p.text.as_str()).collect();
        assert_eq!(hits, vec!["qualidade", "perfeito"]);
    }

    #[test]
    fn blank_phrase_never_matches() {
        let p = Phrase::new("   ".to_string());
        assert!(!p.is_present_in("anything"));
    }

    #[test]
    fn contains_any_is_substring_based() {
        assert!(contains_any("foi bom, mas demorou", &["mas", "porem"]));
        assert!(contains_any("demasiado", &["mas"]));
        assert!(!contains_any("tudo certo", &["mas", "porem"]));
    }
}
