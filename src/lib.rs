//! # Introduction
//!
//! cohcheck verifies the end-of-run cache state printed by a multiprocessor
//! cache-coherence simulator. It parses the simulator's cache-content dump,
//! proves line by line that no two caches hold the same block in states the
//! protocol forbids together, and reports per-cache statistics alongside a
//! PASS/FAIL verdict for every invariant.
//!
//! ## Verification pipeline
//!
//! ```text
//! Dump text → Parser → CacheSnapshot → { Checker, Statistics } → Report / TUI
//! ```
//!
//! 1. [`parser`]: classifies dump lines, gates on `CACHE CONTENT` / `CACHE END`
//!    sections and decodes `CacheLine{...}` records.
//! 2. [`snapshot`]: the immutable cache-state model, keyed by cache id in
//!    first-seen order.
//! 3. [`checker`]: the invariant table and the cross-cache evaluation routine.
//! 4. [`stats`]: per-cache `last_used` range and per-state counts.
//! 5. [`report`]: text and JSON rendering; [`verify`] ties the stages together.
//! 6. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Invariants (MESI)
//!
//! | Subject state | Forbidden in any peer cache |
//! |---------------|-----------------------------|
//! | Modified      | Modified, Exclusive, Shared |
//! | Exclusive     | Modified, Exclusive, Shared |
//! | Shared        | Modified, Exclusive         |
//!
//! Within one cache, no address may be listed twice under the same state.
//! Invalid lines carry no obligation.

pub mod checker;
pub mod config;
pub mod parser;
pub mod report;
pub mod snapshot;
pub mod stats;
pub mod ui;
pub mod verify;

pub use config::VerifyConfig;
pub use verify::{verify_file, verify_text, Verification, VerifyError};
