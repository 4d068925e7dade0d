//! Snapshot dump parser
//!
//! This module transforms the simulator's textual dump into a [`CacheSnapshot`]:
//! - [`lexer`]: Line classification (raw line → [`lexer::LineKind`])
//! - [`record`]: Record literal decoding (`CacheLine{...}` → [`CacheLineRecord`])
//! - [`parse`]: Section state machine and error types
//!
//! The parser performs no I/O; callers hand it text they have already read.
//!
//! [`CacheSnapshot`]: crate::snapshot::CacheSnapshot
//! [`CacheLineRecord`]: crate::snapshot::CacheLineRecord

pub mod lexer;
pub mod parse;
pub mod record;

pub use parse::{parse_snapshot, ParseError, ParseErrorKind, SnapshotParser};
