//! Analysis session orchestration
//!
//! Ties the schema compressor, history ledger, executor, and compression
//! client together behind a single mutable session.

pub mod catalogue;
mod findings;
mod session;

pub use session::{LoadReport, Session, SessionError, StepReport, TokenStats};
