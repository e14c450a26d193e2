#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod oracle;
mod rules;

pub use api::{Classification, Classifier, MatchedPhrases, Options, classify_with, decide, normalize, preprocess, rules};
pub use engine::{CategorySet, Decision, RunMetrics};
pub use error::{ClassifyError, ParseLabelError};
pub use oracle::{CommandOracle, Deadline, FnOracle, Prediction, SentimentOracle, Serialized, StaticOracle};
pub use rules::lexicon::{Category, Lexicon};

use std::fmt;
use std::str::FromStr;

// --- Labels -----------------------------------------------------------------

/// Final label assigned to a review.
///
/// The wire form is the lowercase token returned by [`Sentiment::as_str`];
/// internal code never compares strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(ParseLabelError { token: s.to_string() }),
        }
    }
}

/// Polarity reported by the oracle. The oracle never answers "neutral".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }
}

impl From<Polarity> for Sentiment {
    fn from(p: Polarity) -> Self {
        match p {
            Polarity::Positive => Sentiment::Positive,
            Polarity::Negative => Sentiment::Negative,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Polarity::Positive),
            "negative" => Ok(Polarity::Negative),
            _ => Err(ParseLabelError { token: s.to_string() }),
        }
    }
}

// --- Evidence ---------------------------------------------------------------

/// Signal vector produced once per classification call and consumed by the
/// cascade.
///
/// Counts are the number of distinct lexicon phrases found, not occurrences.
/// `negation_count` is carried for traces only; no cascade rule reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evidence {
    pub strong_positive_count: usize,
    pub strong_negative_count: usize,
    pub neutral_indicator_count: usize,
    pub hedge_count: usize,
    pub negation_count: usize,
    pub has_contradiction: bool,
    pub matches_neutral_pattern: bool,
    pub oracle_label: Polarity,
    pub oracle_confidence: f64,
}

impl Evidence {
    /// Evidence with no lexical signal at all, carrying only the oracle's answer.
    pub fn from_oracle(prediction: Prediction) -> Self {
        Evidence {
            strong_positive_count: 0,
            strong_negative_count: 0,
            neutral_indicator_count: 0,
            hedge_count: 0,
            negation_count: 0,
            has_contradiction: false,
            matches_neutral_pattern: false,
            oracle_label: prediction.label,
            oracle_confidence: prediction.confidence,
        }
    }

    /// Lexicon categories with at least one hit.
    pub fn categories(&self) -> CategorySet {
        let mut set = CategorySet::empty();
        if self.strong_positive_count > 0 {
            set |= CategorySet::STRONG_POSITIVE;
        }
        if self.strong_negative_count > 0 {
            set |= CategorySet::STRONG_NEGATIVE;
        }
        if self.neutral_indicator_count > 0 {
            set |= CategorySet::NEUTRAL_CONNECTIVE;
        }
        if self.hedge_count > 0 {
            set |= CategorySet::HEDGE;
        }
        if self.negation_count > 0 {
            set |= CategorySet::NEGATION;
        }
        set
    }
}

// --- Rules ------------------------------------------------------------------

/// What a cascade rule yields once its predicate fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A fixed label.
    Label(Sentiment),
    /// The oracle's polarity, mapped to the matching label.
    FollowOracle,
}

impl Outcome {
    pub fn resolve(self, evidence: &Evidence) -> Sentiment {
        match self {
            Outcome::Label(label) => label,
            Outcome::FollowOracle => evidence.oracle_label.into(),
        }
    }
}

/// A cascade rule: a name, a predicate over the evidence, and the outcome it
/// produces. Rules are plain data; the order of the table is the priority.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub when: fn(&Evidence) -> bool,
    pub then: Outcome,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).field("when", &"<predicate>").field("then", &self.then).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_wire_tokens() {
        for label in Sentiment::ALL {
            assert_eq!(label.to_string().parse::<Sentiment>(), Ok(label));
        }
        assert_eq!(" NEUTRAL ".parse::<Sentiment>(), Ok(Sentiment::Neutral));
        assert!("mixed".parse::<Sentiment>().is_err());
    }

    #[test]
    fn oracle_never_says_neutral() {
        assert_eq!("Negative".parse::<Polarity>(), Ok(Polarity::Negative));
        assert_eq!("neutral".parse::<Polarity>(), Err(ParseLabelError { token: "neutral".to_string() }));
        assert_eq!(Sentiment::from(Polarity::Positive), Sentiment::Positive);
    }

    #[test]
    fn follow_oracle_uses_polarity() {
        let ev = Evidence::from_oracle(Prediction::new(Polarity::Negative, 0.4));
        assert_eq!(Outcome::FollowOracle.resolve(&ev), Sentiment::Negative);
        assert_eq!(Outcome::Label(Sentiment::Neutral).resolve(&ev), Sentiment::Neutral);
        assert!(ev.categories().is_empty());
    }

    #[test]
    fn parse_error_becomes_unavailable() {
        let err: ClassifyError = ParseLabelError { token: "x".to_string() }.into();
        assert!(matches!(err, ClassifyError::OracleUnavailable { .. }));
    }
}
