//! Domain data: the phrase lexicon, the neutral-ambivalence patterns and the
//! ordered decision table.

pub mod cascade;
pub mod lexicon;
pub mod patterns;
