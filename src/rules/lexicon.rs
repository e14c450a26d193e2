//! Phrase lexicon for Brazilian Portuguese support reviews.
//!
//! Five categories of hand-authored phrases. The source lists below are
//! written with their natural spelling; [`Lexicon::builtin`] normalizes them
//! once so they can be compared against normalized review text.

use crate::engine::matcher::Phrase;
use crate::engine::normalize::normalize;
use once_cell::sync::Lazy;

/// Lexicon category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    StrongPositive,
    StrongNegative,
    NeutralConnective,
    Hedge,
    Negation,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::StrongPositive,
        Category::StrongNegative,
        Category::NeutralConnective,
        Category::Hedge,
        Category::Negation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::StrongPositive => "strong-positive",
            Category::StrongNegative => "strong-negative",
            Category::NeutralConnective => "neutral-connective",
            Category::Hedge => "hedge",
            Category::Negation => "negation",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Category::StrongPositive => 0,
            Category::StrongNegative => 1,
            Category::NeutralConnective => 2,
            Category::Hedge => 3,
            Category::Negation => 4,
        }
    }
}

const STRONG_POSITIVE: &[&str] = &[
    "extremamente satisfeito",
    "acima do esperado",
    "excelente",
    "ótimo",
    "muito bom",
    "impecável",
    "superou completamente",
    "nota 10",
    "melhor atendimento",
    "impressionada",
    "adorei",
    "sem complicação",
    "prestativa",
    "recomendo",
    "surpreendeu",
    "muito bem preparados",
    "competentes",
    "eficiente",
    "rapidez",
    "primeira",
    "perfeito",
    "qualidade",
    "atenciosa",
    "dedicada",
    "prático",
    "sem nenhuma complicação",
    "realmente de qualidade",
    "muito prestativa",
    "se dedicou",
    "superou",
    "expectativas",
];

const STRONG_NEGATIVE: &[&str] = &[
    "péssima",
    "decepcionante",
    "insatisfeito",
    "horrível",
    "inaceitável",
    "despreparo",
    "não resolveu",
    "despreparado",
    "não conseguiram resolver",
    "problema não foi resolvido",
    "desperdiçou",
    "perdi tempo",
    "não soube",
    "confuso",
    "contraditório",
    "ignorou",
    "fraco",
    "recorrente",
    "demorado",
    "nunca resolvem",
    "total despreparo",
    "solução errada",
    "muito tempo",
    "não tive uma boa experiência",
    "frustrado",
    "vou reconsiderar",
    "bastante insatisfeito",
    "decepcionado",
    "completamente despreparado",
    "não conseguiu solucionar",
    "falta de consistência",
    "muito mais tempo",
    "não era clara",
];

const NEUTRAL_CONNECTIVE: &[&str] = &[
    "mas",
    "porém",
    "contudo",
    "entretanto",
    "no entanto",
    "apesar de",
    "embora",
    "mesmo assim",
    "ainda assim",
    "por outro lado",
    "ao mesmo tempo",
    "educado mas",
    "respeitoso mas",
    "tentou mas",
    "esforço mas",
    "infelizmente não",
    "não era clara",
    "mediana",
    "poderia ser",
    "esperava mais",
    "não tão eficiente",
    "agradeço pelo esforço",
    "sem solução definitiva",
    "meio incompleta",
    "pela metade",
    "mais ou menos",
    "ok mas",
    "demorou um pouco",
    "não muito",
    "razoável",
    "aceitável",
    "satisfatória",
    "poderia ser mais",
    "resultado final me deixou",
    "espero que melhorem",
    "funcionado bem",
    "não conseguiu solucionar",
    "tentou várias",
    "ao final",
    "infelizmente não conseguiu",
];

const HEDGE: &[&str] = &[
    "um pouco",
    "meio",
    "mais ou menos",
    "razoável",
    "aceitável",
    "ok",
    "regular",
    "satisfatório",
    "mediano",
    "comum",
    "normal",
    "padrão",
    "básico",
    "no geral",
];

const NEGATION: &[&str] = &["não", "nunca", "jamais", "nada", "nenhum", "nem", "tampouco", "sequer", "infelizmente"];

/// Contrastive connectives behind the contradiction flag. Matched as plain
/// substrings of the normalized text.
pub const CONTRADICTION_CONNECTIVES: &[&str] = &["mas", "porem", "contudo", "entretanto", "no entanto", "apesar"];

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::from_lists([STRONG_POSITIVE, STRONG_NEGATIVE, NEUTRAL_CONNECTIVE, HEDGE, NEGATION])
});

/// Immutable, normalized phrase sets indexed by [`Category`].
#[derive(Debug, Clone)]
pub struct Lexicon {
    categories: [Vec<Phrase>; 5],
}

impl Lexicon {
    /// The process-wide built-in lexicon.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Build a lexicon from raw phrase lists ordered as [`Category::ALL`].
    ///
    /// Phrases are normalized; duplicates (after normalization) within a
    /// category are dropped, keeping the first occurrence.
    pub fn from_lists(lists: [&[&str]; 5]) -> Self {
        let categories = lists.map(|list| {
            let mut phrases: Vec<Phrase> = Vec::with_capacity(list.len());
            for raw in list {
                let phrase = Phrase::new(normalize(raw));
                if !phrases.iter().any(|p| p.text == phrase.text) {
                    phrases.push(phrase);
                }
            }
            phrases
        });
        Lexicon { categories }
    }

    /// Phrases of `category`, in source order.
    pub fn phrases(&self, category: Category) -> &[Phrase] {
        &self.categories[category.index()]
    }

    /// Total number of phrases across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_phrases_are_unique_per_category() {
        let lex = Lexicon::builtin();
        for cat in Category::ALL {
            let phrases = lex.phrases(cat);
            let unique: HashSet<&str> = phrases.iter().map(|p| p.text.as_str()).collect();
            assert_eq!(unique.len(), phrases.len(), "duplicate phrase in {}", cat.name());
            assert!(!phrases.is_empty(), "{} is empty", cat.name());
        }
    }

    #[test]
    fn builtin_phrases_are_normalized() {
        let lex = Lexicon::builtin();
        for cat in Category::ALL {
            for p in lex.phrases(cat) {
                assert_eq!(normalize(&p.text), p.text);
            }
        }
        assert!(lex.phrases(Category::StrongNegative).iter().any(|p| p.text == "pessima"));
        assert!(lex.phrases(Category::Negation).iter().any(|p| p.text == "nao"));
    }

    #[test]
    fn duplicates_collapse_after_normalization() {
        let positive: &[&str] = &["Ótimo", "otimo", "ótimo"];
        let none: &[&str] = &[];
        let lex = Lexicon::from_lists([positive, none, none, none, none]);
        assert_eq!(lex.phrases(Category::StrongPositive).len(), 1);
        assert_eq!(lex.len(), 1);
        assert!(!lex.is_empty());
    }

    #[test]
    fn connectives_are_normalized() {
        for c in CONTRADICTION_CONNECTIVES {
            assert_eq!(normalize(c), *c);
        }
    }
}
