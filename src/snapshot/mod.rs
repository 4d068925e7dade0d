//! Cache-state model for one end-of-run snapshot
//!
//! A [`CacheSnapshot`] maps each cache id, in the order it first appeared in
//! the dump, to the line records that cache listed. The parser is the only
//! producer; the checker and the statistics reporter each read it through a
//! shared reference and never mutate it.
//!
//! # Dump Grammar
//!
//! ```text
//! CACHE CONTENT
//! Cache 0:
//! 	CacheLine{set_index: 2, tag: 5, last_used: 17, status: M}
//! Cache 1:
//! CACHE END
//! ```
//!
//! [`CacheSnapshot::to_dump`] renders exactly this grammar, so a parsed
//! snapshot can be written back out and re-parsed without loss.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::config::{RECORD_PREFIX, SECTION_CLOSE, SECTION_OPEN};

/// Coherence state of a single cache line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CacheLineState {
    Modified,
    Exclusive,
    Shared,
    Invalid,
}

impl CacheLineState {
    /// States that carry a coherence obligation, in reporting order
    pub const OBSERVABLE: [CacheLineState; 3] = [
        CacheLineState::Modified,
        CacheLineState::Exclusive,
        CacheLineState::Shared,
    ];

    /// Decode the single-letter status used in the dump
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "M" => Some(CacheLineState::Modified),
            "E" => Some(CacheLineState::Exclusive),
            "S" => Some(CacheLineState::Shared),
            "I" => Some(CacheLineState::Invalid),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            CacheLineState::Modified => 'M',
            CacheLineState::Exclusive => 'E',
            CacheLineState::Shared => 'S',
            CacheLineState::Invalid => 'I',
        }
    }

    pub fn is_valid(self) -> bool {
        self != CacheLineState::Invalid
    }
}

impl fmt::Display for CacheLineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Identifier of one cache (one core's private cache)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CacheId(pub u32);

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity of a memory block across caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineAddress {
    pub tag: u64,
    pub set_index: u64,
}

impl fmt::Display for LineAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag {}, set {}", self.tag, self.set_index)
    }
}

/// One materialized line of a cache directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheLineRecord {
    pub set_index: u64,
    pub tag: u64,
    pub last_used: u64, // Per-cache recency counter
    pub status: CacheLineState,
}

impl CacheLineRecord {
    pub fn address(&self) -> LineAddress {
        LineAddress {
            tag: self.tag,
            set_index: self.set_index,
        }
    }
}

impl fmt::Display for CacheLineRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{{set_index: {}, tag: {}, last_used: {}, status: {}}}",
            RECORD_PREFIX, self.set_index, self.tag, self.last_used, self.status
        )
    }
}

/// Full multiprocessor cache state at one instant
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    caches: IndexMap<CacheId, Vec<CacheLineRecord>>,
}

impl CacheSnapshot {
    /// Build a snapshot from already-ordered cache contents.
    ///
    /// A repeated id keeps its first position and takes the last contents,
    /// the same rule the parser applies to a repeated `Cache <id>:` header.
    pub fn from_caches<I>(caches: I) -> Self
    where
        I: IntoIterator<Item = (CacheId, Vec<CacheLineRecord>)>,
    {
        CacheSnapshot {
            caches: caches.into_iter().collect(),
        }
    }

    pub(crate) fn from_map(caches: IndexMap<CacheId, Vec<CacheLineRecord>>) -> Self {
        CacheSnapshot { caches }
    }

    /// Iterate caches in first-seen order
    pub fn caches(&self) -> impl Iterator<Item = (CacheId, &[CacheLineRecord])> + '_ {
        self.caches.iter().map(|(id, records)| (*id, records.as_slice()))
    }

    pub fn cache_ids(&self) -> impl Iterator<Item = CacheId> + '_ {
        self.caches.keys().copied()
    }

    /// Records of one cache, or `None` if the id never appeared
    pub fn records(&self, id: CacheId) -> Option<&[CacheLineRecord]> {
        self.caches.get(&id).map(Vec::as_slice)
    }

    /// Number of caches
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Number of records across all caches
    pub fn total_records(&self) -> usize {
        self.caches.values().map(Vec::len).sum()
    }

    /// Render the snapshot back into a single cache-content section
    pub fn to_dump(&self) -> String {
        let mut out = String::new();
        out.push_str(SECTION_OPEN);
        out.push('\n');
        for (id, records) in &self.caches {
            out.push_str(&format!("Cache {}: \n", id));
            for record in records {
                out.push('\t');
                out.push_str(&record.to_string());
                out.push('\n');
            }
        }
        out.push_str(SECTION_CLOSE);
        out.push('\n');
        out
    }
}

// IndexMap equality ignores order; snapshots are equal only in the same key order
impl PartialEq for CacheSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.caches.len() == other.caches.len() && self.caches.iter().eq(other.caches.iter())
    }
}

impl Eq for CacheSnapshot {}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(set_index: u64, tag: u64, last_used: u64, status: CacheLineState) -> CacheLineRecord {
        CacheLineRecord {
            set_index,
            tag,
            last_used,
            status,
        }
    }

    #[test]
    fn test_record_display_matches_dump_literal() {
        let record = line(2, 5, 17, CacheLineState::Modified);
        assert_eq!(
            record.to_string(),
            "CacheLine{set_index: 2, tag: 5, last_used: 17, status: M}"
        );
    }

    #[test]
    fn test_status_letters() {
        for state in [
            CacheLineState::Modified,
            CacheLineState::Exclusive,
            CacheLineState::Shared,
            CacheLineState::Invalid,
        ] {
            let letter = state.letter().to_string();
            assert_eq!(CacheLineState::from_letter(&letter), Some(state));
        }
        assert_eq!(CacheLineState::from_letter("O"), None);
        assert_eq!(CacheLineState::from_letter("m"), None);
        assert!(!CacheLineState::Invalid.is_valid());
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let snapshot = CacheSnapshot::from_caches(vec![
            (CacheId(3), vec![line(0, 1, 1, CacheLineState::Shared)]),
            (CacheId(0), vec![]),
            (CacheId(3), vec![]),
        ]);

        let ids: Vec<_> = snapshot.cache_ids().collect();
        assert_eq!(ids, vec![CacheId(3), CacheId(0)]);
        assert_eq!(snapshot.records(CacheId(3)), Some(&[][..]));
        assert_eq!(snapshot.records(CacheId(7)), None);
        assert_eq!(snapshot.total_records(), 0);
    }

    #[test]
    fn test_equality_respects_order() {
        let a = CacheSnapshot::from_caches(vec![(CacheId(0), vec![]), (CacheId(1), vec![])]);
        let b = CacheSnapshot::from_caches(vec![(CacheId(1), vec![]), (CacheId(0), vec![])]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_to_dump_layout() {
        let snapshot = CacheSnapshot::from_caches(vec![
            (CacheId(0), vec![line(1, 2, 3, CacheLineState::Exclusive)]),
            (CacheId(1), vec![]),
        ]);

        assert_eq!(
            snapshot.to_dump(),
            "CACHE CONTENT\n\
             Cache 0: \n\
             \tCacheLine{set_index: 1, tag: 2, last_used: 3, status: E}\n\
             Cache 1: \n\
             CACHE END\n"
        );
    }
}
