//! Signal extraction.
//!
//! Turns raw review text into an [`Evidence`] vector:
//!
//! ```text
//! raw text ──normalize──> normalized ──scan──> Signals (lexicon counts,
//!     │                                         contradiction, pattern)
//!     └──────────── oracle.predict(raw) ──────> Prediction
//!                                                   │
//!                      Signals + Prediction ───────> Evidence
//! ```
//!
//! The lexical half (`scan`) is total over any input. The oracle is called
//! exactly once per `extract`, on the raw text; its answer is copied into the
//! evidence unchanged. An oracle failure fails the extraction.

use super::matcher::{Phrase, contains_any, present};
use super::normalize::normalize;
use crate::oracle::{Prediction, SentimentOracle};
use crate::rules::lexicon::{CONTRADICTION_CONNECTIVES, Category, Lexicon};
use crate::rules::patterns::{NeutralPattern, first_match, neutral_patterns};
use crate::{ClassifyError, Evidence};
use std::time::{Duration, Instant};

bitflags::bitflags! {
    /// Lexicon categories that produced at least one hit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategorySet: u8 {
        const STRONG_POSITIVE    = 1 << 0;
        const STRONG_NEGATIVE    = 1 << 1;
        const NEUTRAL_CONNECTIVE = 1 << 2;
        const HEDGE              = 1 << 3;
        const NEGATION           = 1 << 4;
    }
}

impl CategorySet {
    pub fn of(category: Category) -> Self {
        match category {
            Category::StrongPositive => CategorySet::STRONG_POSITIVE,
            Category::StrongNegative => CategorySet::STRONG_NEGATIVE,
            Category::NeutralConnective => CategorySet::NEUTRAL_CONNECTIVE,
            Category::Hedge => CategorySet::HEDGE,
            Category::Negation => CategorySet::NEGATION,
        }
    }

    /// Category names in [`Category::ALL`] order.
    pub fn names(self) -> Vec<&'static str> {
        Category::ALL.into_iter().filter(|c| self.contains(CategorySet::of(*c))).map(Category::name).collect()
    }
}

/// Lexical signals of one text, before the oracle is consulted.
#[derive(Debug, Clone)]
pub struct Signals<'l> {
    /// Matched phrases per category, indexed like [`Category::ALL`].
    pub matched: [Vec<&'l Phrase>; 5],
    pub has_contradiction: bool,
    pub neutral_pattern: Option<&'static str>,
}

impl<'l> Signals<'l> {
    pub fn count(&self, category: Category) -> usize {
        self.matched(category).len()
    }

    pub fn matched(&self, category: Category) -> &[&'l Phrase] {
        &self.matched[category.index()]
    }

    /// Combine with the oracle's answer into the final evidence vector.
    pub fn with_prediction(&self, prediction: Prediction) -> Evidence {
        Evidence {
            strong_positive_count: self.count(Category::StrongPositive),
            strong_negative_count: self.count(Category::StrongNegative),
            neutral_indicator_count: self.count(Category::NeutralConnective),
            hedge_count: self.count(Category::Hedge),
            negation_count: self.count(Category::Negation),
            has_contradiction: self.has_contradiction,
            matches_neutral_pattern: self.neutral_pattern.is_some(),
            oracle_label: prediction.label,
            oracle_confidence: prediction.confidence,
        }
    }
}

/// Everything `extract` learned about one text.
#[derive(Debug, Clone)]
pub struct Extraction<'l> {
    pub normalized: String,
    pub signals: Signals<'l>,
    pub evidence: Evidence,
    /// Time spent on normalization and lexical scanning.
    pub scan_time: Duration,
    /// Time spent inside the oracle.
    pub oracle_time: Duration,
}

/// Extractor over a lexicon and a set of neutral patterns.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'l> {
    lexicon: &'l Lexicon,
    patterns: &'l [NeutralPattern],
}

impl Default for Extractor<'static> {
    fn default() -> Self {
        Extractor::new(Lexicon::builtin(), neutral_patterns())
    }
}

impl<'l> Extractor<'l> {
    pub fn new(lexicon: &'l Lexicon, patterns: &'l [NeutralPattern]) -> Self {
        Extractor { lexicon, patterns }
    }

    /// Lexical signals of already-normalized text. Never fails.
    pub fn scan(&self, normalized: &str) -> Signals<'l> {
        let matched = Category::ALL.map(|cat| present(self.lexicon.phrases(cat), normalized));
        let has_contradiction = contains_any(normalized, CONTRADICTION_CONNECTIVES);
        let neutral_pattern = first_match(self.patterns, normalized).map(|p| p.name);

        Signals { matched, has_contradiction, neutral_pattern }
    }

    /// Normalize, scan, and consult `oracle` once on the raw `text`.
    pub fn extract<O>(&self, text: &str, oracle: &O) -> Result<Extraction<'l>, ClassifyError>
    where
        O: SentimentOracle + ?Sized,
    {
        let debug = std::env::var_os("RESENHA_DEBUG_RULES").is_some();

        let scan_start = Instant::now();
        let normalized = normalize(text);
        let signals = self.scan(&normalized);
        let scan_time = scan_start.elapsed();

        if debug {
            for cat in Category::ALL {
                let hits: Vec<&str> = signals.matched(cat).iter().map(|p| p.text.as_str()).collect();
                if !hits.is_empty() {
                    eprintln!("[extract] category={} hits={:?}", cat.name(), hits);
                }
            }
            eprintln!(
                "[extract] contradiction={} neutral_pattern={:?}",
                signals.has_contradiction, signals.neutral_pattern
            );
        }

        let oracle_start = Instant::now();
        let prediction = oracle.predict(text).and_then(Prediction::validated);
        let oracle_time = oracle_start.elapsed();

        let prediction = match prediction {
            Ok(p) => p,
            Err(err) => {
                if debug {
                    eprintln!("[oracle] error=\"{err}\"");
                }
                return Err(err);
            }
        };

        if debug {
            eprintln!("[oracle] label={} confidence={:.4}", prediction.label, prediction.confidence);
        }

        let evidence = signals.with_prediction(prediction);
        Ok(Extraction { normalized, signals, evidence, scan_time, oracle_time })
    }
}
