//! First-match-wins rule evaluation.
//!
//! The reducer knows nothing about sentiment heuristics: it walks an ordered
//! slice of [`Rule`]s and stops at the first predicate that holds. The table
//! itself lives in `src/rules/cascade.rs`.
//!
//! ```text
//! evidence ─▶ rule 1? ─no─▶ rule 2? ─no─▶ ... ─▶ rule n?
//!                │yes          │yes                │yes
//!                ▼             ▼                   ▼
//!             outcome       outcome             outcome
//! ```
//!
//! A table that ends without an unconditional rule may let evidence fall off
//! the end; the reducer then follows the oracle's polarity, which is always
//! defined.

use crate::{Evidence, Rule, Sentiment};

/// Name recorded when no rule in the table fired.
pub const NO_RULE: &str = "<no rule fired>";

/// Result of running the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub label: Sentiment,
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// 1-based position of that rule in the table, `None` if nothing fired.
    pub position: Option<usize>,
}

/// Index and rule of the first rule whose predicate holds.
pub fn first_match<'r>(rules: &'r [Rule], evidence: &Evidence) -> Option<(usize, &'r Rule)> {
    rules.iter().enumerate().find(|(_, rule)| (rule.when)(evidence))
}

/// An ordered rule table.
#[derive(Debug, Clone, Copy)]
pub struct Cascade<'r> {
    rules: &'r [Rule],
}

impl<'r> Cascade<'r> {
    pub fn new(rules: &'r [Rule]) -> Self {
        Cascade { rules }
    }

    pub fn decide(&self, evidence: &Evidence) -> Decision {
        let decision = match first_match(self.rules, evidence) {
            Some((idx, rule)) => {
                Decision { label: rule.then.resolve(evidence), rule: rule.name, position: Some(idx + 1) }
            }
            None => Decision { label: evidence.oracle_label.into(), rule: NO_RULE, position: None },
        };

        if std::env::var_os("RESENHA_DEBUG_RULES").is_some() {
            eprintln!(
                "[cascade] rule={:?} position={:?} label={}",
                decision.rule, decision.position, decision.label
            );
        }

        decision
    }
}
