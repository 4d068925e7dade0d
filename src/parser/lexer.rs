//! Line classifier for snapshot dumps
//!
//! The dump is line-oriented, so instead of a token stream the lexer maps each
//! raw line to a [`LineKind`]. Whether a kind is meaningful depends on the
//! section state, which is the parser's job; the lexer never fails.

use crate::config::{CACHE_HEADER, RECORD_PREFIX, SECTION_CLOSE, SECTION_OPEN};
use crate::snapshot::CacheId;

/// Classification of a single dump line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `CACHE CONTENT`
    SectionOpen,
    /// `CACHE END`
    SectionClose,
    /// `Cache <id>:`
    CacheHeader(CacheId),
    /// Contains `Cache ` but the id is not a non-negative integer followed by `:`
    MalformedHeader,
    /// `CacheLine{...}`, trimmed
    Record(&'a str),
    Blank,
    /// Banners, simulator statistics, anything else
    Other,
}

impl LineKind<'_> {
    /// Short name used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            LineKind::SectionOpen => "section open",
            LineKind::SectionClose => "section close",
            LineKind::CacheHeader(_) => "cache header",
            LineKind::MalformedHeader => "malformed cache header",
            LineKind::Record(_) => "record",
            LineKind::Blank => "blank line",
            LineKind::Other => "unrecognized line",
        }
    }
}

/// Classify one raw line. Surrounding tabs, spaces and line terminators are ignored.
pub fn classify(raw: &str) -> LineKind<'_> {
    let line = raw.trim();

    if line.contains(SECTION_OPEN) {
        return LineKind::SectionOpen;
    }
    if line.contains(SECTION_CLOSE) {
        return LineKind::SectionClose;
    }
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with(RECORD_PREFIX) {
        return LineKind::Record(line);
    }
    if let Some(pos) = line.find(CACHE_HEADER) {
        return match parse_header_id(&line[pos + CACHE_HEADER.len()..]) {
            Some(id) => LineKind::CacheHeader(id),
            None => LineKind::MalformedHeader,
        };
    }

    LineKind::Other
}

// Accepts "<digits>:" optionally followed by anything (the simulator prints a trailing space)
fn parse_header_id(rest: &str) -> Option<CacheId> {
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());

    if digits_end == 0 || !rest[digits_end..].starts_with(':') {
        return None;
    }

    rest[..digits_end].parse::<u32>().ok().map(CacheId)
}
