//! Analysis execution collaborator
//!
//! The session hands an executor a recipe and a dataset and records whatever
//! comes back; failures are data, not errors. `StatsEngine` is the built-in
//! executor running the canned analyses directly over the in-memory dataset.

mod engine;
mod executor;
mod tools;

pub use engine::StatsEngine;
pub use executor::{ExecOutcome, Executor};
