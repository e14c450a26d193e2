//! The decision table.
//!
//! Evaluated top to bottom; the first rule whose predicate holds decides the
//! label. Order is the priority: lexical evidence that is strong and one-sided
//! wins first, contradiction pulls toward neutral, the oracle is trusted alone
//! only when confident and uncontradicted, and its raw polarity is the last
//! resort.

use crate::Rule;

/// Oracle confidence below which a contradicted review is neutral.
pub const CONTRADICTED_CONFIDENCE: f64 = 0.8;
/// Oracle confidence at which an uncontradicted oracle answer is final.
pub const TRUSTED_CONFIDENCE: f64 = 0.9;
/// Oracle confidence needed to confirm a single positive phrase.
pub const CONFIRMING_CONFIDENCE: f64 = 0.85;
/// Oracle confidence below which a review with weak evidence is neutral.
pub const UNSURE_CONFIDENCE: f64 = 0.7;

pub fn get() -> Vec<Rule> {
    vec![
        rule! {
            name: "neutral pattern",
            when: |e| e.matches_neutral_pattern,
            then: neutral,
        },
        rule! {
            name: "overwhelming negative",
            when: |e| e.strong_negative_count >= 3,
            then: negative,
        },
        rule! {
            name: "neutral connectives",
            when: |e| e.neutral_indicator_count >= 3 || (e.has_contradiction && e.neutral_indicator_count >= 2),
            then: neutral,
        },
        rule! {
            name: "mixed strong signals",
            when: |e| e.strong_positive_count >= 2 && e.strong_negative_count >= 1,
            then: neutral,
        },
        rule! {
            name: "hedged contradiction",
            when: |e| e.hedge_count >= 2 && e.has_contradiction,
            then: neutral,
        },
        rule! {
            name: "one-sided negative",
            when: |e| e.strong_negative_count >= 2 && e.strong_positive_count == 0,
            then: negative,
        },
        rule! {
            name: "overwhelming positive",
            when: |e| e.strong_positive_count >= 3,
            then: positive,
        },
        rule! {
            name: "contradiction, unsure oracle",
            when: |e| e.has_contradiction && e.oracle_confidence < CONTRADICTED_CONFIDENCE,
            then: neutral,
        },
        rule! {
            name: "confident oracle",
            when: |e| e.oracle_confidence >= TRUSTED_CONFIDENCE && !e.has_contradiction,
            then: oracle,
        },
        rule! {
            name: "positive phrases",
            when: |e| e.strong_positive_count >= 2 && e.strong_negative_count == 0 && !e.has_contradiction,
            then: positive,
        },
        rule! {
            name: "negative phrase",
            when: |e| e.strong_negative_count >= 1 && e.strong_positive_count == 0 && !e.has_contradiction,
            then: negative,
        },
        rule! {
            name: "positive phrase, confirming oracle",
            when: |e| e.strong_positive_count >= 1
                && e.strong_negative_count == 0
                && e.oracle_confidence >= CONFIRMING_CONFIDENCE
                && !e.has_contradiction,
            then: positive,
        },
        rule! {
            name: "weak or contradicted",
            when: |e| e.oracle_confidence < UNSURE_CONFIDENCE || e.has_contradiction,
            then: neutral,
        },
        rule! {
            name: "oracle fallback",
            when: |_e| true,
            then: oracle,
        },
    ]
}
