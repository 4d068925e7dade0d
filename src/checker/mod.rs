//! Coherence-invariant checker
//!
//! - [`rules`]: invariant table per protocol
//! - [`engine`]: the cross-cache evaluation routine
//! - [`report`]: violations and per-cache outcomes
//!
//! The checker is a pure function of a [`CacheSnapshot`]. It never repairs
//! anything; every violation means the simulator under test is wrong for the
//! input that produced the snapshot.
//!
//! [`CacheSnapshot`]: crate::snapshot::CacheSnapshot

pub mod engine;
pub mod report;
pub mod rules;

pub use engine::{check_snapshot, Checker};
pub use report::{CheckOutcome, CheckReport, CoherenceFailure, Outcome, Violation};
pub use rules::{CoherenceRules, InvariantClass, InvariantRule};
