//! Snapshot parser coordinator
//!
//! This module provides [`SnapshotParser`], the section state machine that
//! turns classified dump lines into a [`CacheSnapshot`], and the error types
//! shared by the whole parser.
//!
//! # Section Gating
//!
//! Only lines between a `CACHE CONTENT` marker and the next `CACHE END` are
//! interpreted. Everything the simulator prints outside a section (banners,
//! configuration echo, its own statistics) is skipped without inspection, so
//! a stray `Cache 0:` in a log message never opens a cache block.
//!
//! # Failure
//!
//! The first malformed line aborts the parse. A partially parsed snapshot
//! cannot be trusted for invariant checking, so none is returned.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use super::lexer::{classify, LineKind};
use super::record::parse_record;
use crate::snapshot::{CacheId, CacheLineRecord, CacheSnapshot};

/// What was wrong with a rejected line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("record is not of the form CacheLine{{...}}")]
    MalformedRecord,

    #[error("expected 4 fields, found {found}")]
    FieldCount { found: usize },

    #[error("field '{field}' is not a `key: value` pair")]
    MalformedField { field: String },

    #[error("unknown field '{key}'")]
    UnknownField { key: String },

    #[error("field '{key}' appears more than once")]
    DuplicateField { key: String },

    #[error("field '{key}' is not a non-negative integer: '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("unknown status '{value}' (expected M, E, S or I)")]
    UnknownStatus { value: String },

    #[error("malformed cache header (expected `Cache <id>:`)")]
    MalformedHeader,

    #[error("record appears before any `Cache <id>:` header")]
    RecordOutsideCache,

    #[error("unexpected {found} inside a cache-content section")]
    UnexpectedLine { found: &'static str },
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {line}: {kind}: '{text}'")]
pub struct ParseError {
    /// 1-based line number in the dump
    pub line: usize,
    /// The offending line, without its line terminator
    pub text: String,
    pub kind: ParseErrorKind,
}

/// Section state machine over dump lines
#[derive(Debug, Default)]
pub struct SnapshotParser {
    caches: IndexMap<CacheId, Vec<CacheLineRecord>>,
    in_section: bool,
    active: Option<CacheId>,
}

impl SnapshotParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole dump held in memory
    pub fn parse_str(text: &str) -> Result<CacheSnapshot, ParseError> {
        Self::new().parse_lines(text.lines())
    }

    /// Parse an ordered sequence of lines into a snapshot
    pub fn parse_lines<'a, I>(mut self, lines: I) -> Result<CacheSnapshot, ParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (index, raw) in lines.into_iter().enumerate() {
            self.feed(index + 1, raw)?;
        }

        if self.in_section {
            warn!("cache-content section not closed before end of input");
        }

        debug!(
            caches = self.caches.len(),
            records = self.caches.values().map(Vec::len).sum::<usize>(),
            "parsed snapshot"
        );

        Ok(CacheSnapshot::from_map(self.caches))
    }

    fn feed(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        let kind = classify(raw);

        if !self.in_section {
            if kind == LineKind::SectionOpen {
                debug!(line = line_no, "cache-content section opened");
                self.in_section = true;
            }
            return Ok(());
        }

        match kind {
            LineKind::SectionOpen => {
                debug!(line = line_no, "nested section marker ignored");
            }
            LineKind::SectionClose => {
                debug!(line = line_no, "cache-content section closed");
                self.in_section = false;
                self.active = None;
            }
            LineKind::Blank => {}
            LineKind::CacheHeader(id) => {
                if self.caches.insert(id, Vec::new()).is_some() {
                    warn!(line = line_no, cache = %id, "cache listed again, earlier records dropped");
                }
                self.active = Some(id);
            }
            LineKind::Record(text) => {
                let id = self
                    .active
                    .ok_or_else(|| error(line_no, raw, ParseErrorKind::RecordOutsideCache))?;
                let record = parse_record(text).map_err(|kind| error(line_no, raw, kind))?;
                if let Some(records) = self.caches.get_mut(&id) {
                    records.push(record);
                }
            }
            LineKind::MalformedHeader => {
                return Err(error(line_no, raw, ParseErrorKind::MalformedHeader));
            }
            LineKind::Other => {
                let found = kind.describe();
                return Err(error(line_no, raw, ParseErrorKind::UnexpectedLine { found }));
            }
        }

        Ok(())
    }
}

fn error(line: usize, raw: &str, kind: ParseErrorKind) -> ParseError {
    ParseError {
        line,
        text: raw.trim_end_matches(['\r', '\n']).to_string(),
        kind,
    }
}

/// Parse a dump held in memory
pub fn parse_snapshot(text: &str) -> Result<CacheSnapshot, ParseError> {
    SnapshotParser::parse_str(text)
}
