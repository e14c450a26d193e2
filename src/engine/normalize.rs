//! Text normalization.
//!
//! Every lexicon phrase, contradiction connective and neutral pattern is
//! matched against the *normalized* form of a review:
//!
//! ```text
//! "Atendimento PÉSSIMO, não resolveu"
//!        │ to_lowercase
//!        v
//! "atendimento péssimo, não resolveu"
//!        │ NFD + drop combining marks
//!        v
//! "atendimento pessimo, nao resolveu"
//! ```
//!
//! Punctuation and token order are untouched; matching downstream is
//! substring based and does not care about either.
//!
//! `preprocess` builds a second, lossy form (alphabetic tokens minus stop
//! words). Nothing matches against it today; it is surfaced in verbose output.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercase `text` and strip diacritical marks.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Portuguese function words dropped by [`preprocess`]. Stored normalized.
const STOP_WORDS: &[&str] = &[
    "a", "ao", "aos", "as", "ate", "com", "como", "da", "das", "de", "dela", "dele", "do", "dos", "e", "ela", "ele",
    "eles", "em", "entre", "era", "essa", "esse", "esta", "este", "eu", "foi", "ha", "isso", "isto", "ja", "lhe",
    "me", "meu", "minha", "na", "nas", "no", "nos", "o", "os", "ou", "para", "pela", "pelo", "por", "que", "se",
    "seu", "sua", "tambem", "te", "um", "uma", "voce",
];

/// Secondary normalized form: normalized alphabetic tokens with stop words
/// removed, joined by single spaces.
pub fn preprocess(text: &str) -> String {
    normalize(text)
        .split(|c: char| !c.is_alphabetic())
        .filter(|tok| !tok.is_empty() && !STOP_WORDS.contains(tok))
        .collect::<Vec<_>>()
        .join(" ")
}
