//! Neutral-ambivalence constructions.
//!
//! Compound shapes like "polite, but could not solve it" that phrase counting
//! cannot see. Sources are written against normalized text (lowercase, no
//! diacritics), so "não" is spelled "nao" here.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named regular expression over normalized text.
#[derive(Debug, Clone, Copy)]
pub struct NeutralPattern {
    pub name: &'static str,
    pub regex: &'static Regex,
}

impl NeutralPattern {
    pub fn is_match(&self, normalized: &str) -> bool {
        self.regex.is_match(normalized)
    }
}

static NEUTRAL_PATTERNS: Lazy<Vec<NeutralPattern>> = Lazy::new(|| {
    vec![
        NeutralPattern { name: "polite but unresolved", regex: regex!(r"educado.*mas.*nao conseguiu") },
        NeutralPattern { name: "respectful but unfortunately", regex: regex!(r"respeitoso.*mas.*infelizmente") },
        NeutralPattern { name: "tried but no solution", regex: regex!(r"tentou.*mas.*nao.*solucao") },
        NeutralPattern {
            name: "effort but frustrating result",
            regex: regex!(r"esforco.*mas.*resultado.*frustrado"),
        },
        NeutralPattern {
            name: "worked but not efficient",
            regex: regex!(r"funcionado bem.*mas.*nao.*eficiente"),
        },
        NeutralPattern { name: "could be more detailed", regex: regex!(r"poderia ser.*mais.*detalhado") },
        NeutralPattern {
            name: "satisfactory but incomplete",
            regex: regex!(r"satisfatoria.*mas.*poderia.*completa"),
        },
    ]
});

/// The built-in neutral patterns, in evaluation order.
pub fn neutral_patterns() -> &'static [NeutralPattern] {
    &NEUTRAL_PATTERNS
}

/// First pattern matching `normalized`, if any.
pub fn first_match<'p>(patterns: &'p [NeutralPattern], normalized: &str) -> Option<&'p NeutralPattern> {
    patterns.iter().find(|p| p.is_match(normalized))
}
