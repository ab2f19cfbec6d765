//! Bounded analysis-history ledger
//!
//! Keeps every step but renders them in three tiers: an aggregate line for
//! the oldest, compact one-liners for the middle band, full detail for the
//! newest. Every render is recomputed from current state.

mod ledger;
mod step;

pub use ledger::{HistoryLedger, LedgerStats, SavingsReport};
pub use step::AnalysisStep;
