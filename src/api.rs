use crate::engine::{Cascade, Extraction, Extractor, RunMetrics};
use crate::oracle::SentimentOracle;
use crate::rules::lexicon::Category;
use crate::{ClassifyError, Evidence, Rule, Sentiment};
use once_cell::sync::Lazy;
use std::time::Instant;

pub use crate::engine::normalize::{normalize, preprocess};

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::cascade::get);

/// Options that affect verbose classification output.
///
/// None of them change the label.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Compute the secondary, stop-word-free form of the text.
    pub preprocess: bool,
}

/// Lexicon phrases found in a review, per category, in lexicon order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedPhrases {
    pub strong_positive: Vec<String>,
    pub strong_negative: Vec<String>,
    pub neutral_connective: Vec<String>,
    pub hedge: Vec<String>,
    pub negation: Vec<String>,
}

impl MatchedPhrases {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::StrongPositive => &self.strong_positive,
            Category::StrongNegative => &self.strong_negative,
            Category::NeutralConnective => &self.neutral_connective,
            Category::Hedge => &self.hedge,
            Category::Negation => &self.negation,
        }
    }
}

/// Result from [`Classifier::classify_verbose`].
///
/// Carries the label together with the evidence that produced it and the rule
/// that fired.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The raw input text.
    pub text: String,
    pub label: Sentiment,
    /// Name of the cascade rule that decided the label.
    pub rule: &'static str,
    /// 1-based position of that rule in the cascade.
    pub rule_position: Option<usize>,
    pub evidence: Evidence,
    /// Text the lexicon and patterns were matched against.
    pub normalized: String,
    /// Secondary form, present when [`Options::preprocess`] is set.
    pub preprocessed: Option<String>,
    pub matched: MatchedPhrases,
    /// Name of the neutral pattern that matched, if any.
    pub neutral_pattern: Option<&'static str>,
    pub metrics: RunMetrics,
}

/// Review classifier over an injected oracle.
///
/// Holds no per-call state, so a single instance can serve any number of
/// threads as long as the oracle can (see [`crate::Serialized`]).
///
/// # Example
/// ```
/// use resenha::{Classifier, Polarity, Sentiment, StaticOracle};
///
/// let classifier = Classifier::new(StaticOracle::new(Polarity::Positive, 0.95));
/// let label = classifier.classify("Atendimento impecável, recomendo!").unwrap();
/// assert_eq!(label, Sentiment::Positive);
/// ```
#[derive(Debug)]
pub struct Classifier<O> {
    oracle: O,
    extractor: Extractor<'static>,
    cascade: Cascade<'static>,
    options: Options,
}

impl<O: SentimentOracle> Classifier<O> {
    /// Classifier with the built-in lexicon, patterns and rule table.
    pub fn new(oracle: O) -> Self {
        Self::with_options(oracle, Options::default())
    }

    pub fn with_options(oracle: O, options: Options) -> Self {
        Classifier { oracle, extractor: Extractor::default(), cascade: Cascade::new(&DEFAULT_RULES), options }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Extract the evidence vector for `text`. Calls the oracle once.
    pub fn analyze(&self, text: &str) -> Result<Evidence, ClassifyError> {
        Ok(self.extractor.extract(text, &self.oracle)?.evidence)
    }

    /// Label `text`.
    ///
    /// Fails only when the oracle does; no fallback label is produced.
    pub fn classify(&self, text: &str) -> Result<Sentiment, ClassifyError> {
        let evidence = self.analyze(text)?;
        Ok(self.cascade.decide(&evidence).label)
    }

    /// Label `text` and keep the evidence, matched phrases, fired rule and
    /// timings.
    pub fn classify_verbose(&self, text: &str) -> Result<Classification, ClassifyError> {
        let start = Instant::now();
        let extraction = self.extractor.extract(text, &self.oracle)?;

        let decide_start = Instant::now();
        let decision = self.cascade.decide(&extraction.evidence);
        let decide = decide_start.elapsed();

        let preprocessed = self.options.preprocess.then(|| preprocess(text));
        let metrics =
            RunMetrics { total: start.elapsed(), scan: extraction.scan_time, oracle: extraction.oracle_time, decide };

        Ok(Classification {
            text: text.to_string(),
            label: decision.label,
            rule: decision.rule,
            rule_position: decision.position,
            evidence: extraction.evidence,
            matched: matched_phrases(&extraction),
            neutral_pattern: extraction.signals.neutral_pattern,
            normalized: extraction.normalized,
            preprocessed,
            metrics,
        })
    }
}

/// Run the built-in cascade over `evidence`.
pub fn decide(evidence: &Evidence) -> Sentiment {
    Cascade::new(&DEFAULT_RULES).decide(evidence).label
}

/// The built-in cascade, in evaluation order.
pub fn rules() -> &'static [Rule] {
    &DEFAULT_RULES
}

/// Label `text` with a one-off classifier over `oracle`.
pub fn classify_with<O: SentimentOracle>(text: &str, oracle: O) -> Result<Sentiment, ClassifyError> {
    Classifier::new(oracle).classify(text)
}

fn matched_phrases(extraction: &Extraction<'_>) -> MatchedPhrases {
    let collect =
        |cat: Category| extraction.signals.matched(cat).iter().map(|p| p.text.clone()).collect::<Vec<String>>();
    MatchedPhrases {
        strong_positive: collect(Category::StrongPositive),
        strong_negative: collect(Category::StrongNegative),
        neutral_connective: collect(Category::NeutralConnective),
        hedge: collect(Category::Hedge),
        negation: collect(Category::Negation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FnOracle, Polarity, Prediction, Serialized, StaticOracle};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn classify_verbose_reports_rule_and_evidence() {
        let classifier = Classifier::new(StaticOracle::new(Polarity::Positive, 0.99));
        let res = classifier.classify_verbose("Foi educado, mas não conseguiu resolver.").unwrap();

        assert_eq!(res.label, Sentiment::Neutral);
        assert_eq!(res.rule, "neutral pattern");
        assert_eq!(res.rule_position, Some(1));
        assert_eq!(res.neutral_pattern, Some("polite but unresolved"));
        assert!(res.evidence.matches_neutral_pattern);
        assert_eq!(res.normalized, "foi educado, mas nao conseguiu resolver.");
        assert_eq!(res.preprocessed, None);
        assert!(res.matched.get(Category::NeutralConnective).contains(&"educado mas".to_string()));
        assert!(res.metrics.total >= res.metrics.decide);
    }

    #[test]
    fn preprocess_option_fills_secondary_form() {
        let classifier =
            Classifier::with_options(StaticOracle::new(Polarity::Positive, 0.5), Options { preprocess: true });
        let res = classifier.classify_verbose("O suporte foi impecável!").unwrap();
        assert_eq!(res.preprocessed.as_deref(), Some("suporte impecavel"));
        assert!(classifier.options().preprocess);
    }

    #[test]
    fn verbose_and_plain_agree() {
        let classifier = Classifier::new(StaticOracle::new(Polarity::Negative, 0.75));
        for text in ["", "Serviço horrível.", "Bom, mas demorado.", "Razoável, ok, mas lento."] {
            assert_eq!(classifier.classify(text).unwrap(), classifier.classify_verbose(text).unwrap().label);
        }
    }

    #[test]
    fn analyze_calls_oracle_once() {
        let calls = AtomicUsize::new(0);
        let classifier = Classifier::new(FnOracle::new(|_text: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Prediction::new(Polarity::Positive, 0.5))
        }));
        classifier.analyze("texto qualquer").unwrap();
        classifier.classify("texto qualquer").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn shared_across_threads() {
        let classifier = Classifier::new(Serialized::new(StaticOracle::new(Polarity::Positive, 0.95)));
        let expected = classifier.classify("Atendimento impecável.").unwrap();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..25 {
                        assert_eq!(classifier.classify("Atendimento impecável.").unwrap(), expected);
                    }
                });
            }
        });
    }

    #[test]
    fn classify_with_builds_one_off_classifier() {
        let label = classify_with("nada a declarar", StaticOracle::new(Polarity::Negative, 0.95)).unwrap();
        assert_eq!(label, Sentiment::Negative);
        assert_eq!(rules().len(), 14);
    }
}
