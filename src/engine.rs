//! Classification engine.
//!
//! ## How the parts work together
//!
//! ```text
//! raw text ──▶ normalize (normalize.rs)
//!                 │
//!                 ▼
//!          Extractor::scan (extract.rs)   ◀── lexicon + neutral patterns
//!            - phrase presence (matcher.rs)    (src/rules/)
//!            - contradiction connectives
//!            - neutral patterns
//!                 │
//! raw text ──▶ oracle.predict ──▶ Prediction
//!                 │
//!                 ▼
//!             Evidence
//!                 │
//!                 ▼
//!          Cascade::decide (cascade.rs)   ◀── rule table (src/rules/cascade.rs)
//!                 │
//!                 ▼
//!             Decision { label, rule }
//! ```
//!
//! Nothing here holds state between calls. The lexicon, the patterns and the
//! rule table are immutable statics; the oracle is passed in.
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: lowercase + diacritic stripping, and the secondary
//!   stop-word-free form.
//! - `matcher.rs`: word-presence phrase matching.
//! - `extract.rs`: builds `Signals` and the final `Evidence`.
//! - `cascade.rs`: generic first-match-wins reducer over a rule table.
//! - `metrics.rs`: per-phase timings for verbose runs.
//!
//! ## Debugging
//!
//! Set `RESENHA_DEBUG_RULES=1` to print extraction, oracle and cascade traces
//! to stderr.

#[path = "engine/cascade.rs"]
pub(crate) mod cascade;
#[path = "engine/extract.rs"]
pub(crate) mod extract;
#[path = "engine/matcher.rs"]
pub(crate) mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
pub(crate) mod normalize;

pub use cascade::{Cascade, Decision};
pub use extract::{CategorySet, Extraction, Extractor};
pub use metrics::RunMetrics;
