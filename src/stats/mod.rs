//! Per-cache descriptive statistics
//!
//! Independent of the checker: both read the same immutable snapshot.

use serde::Serialize;

use crate::snapshot::{CacheId, CacheLineRecord, CacheLineState, CacheSnapshot};

/// Smallest and largest `last_used` value among a cache's records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastUsedRange {
    pub min: u64,
    pub max: u64,
}

/// Statistics for one cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub cache_id: CacheId,
    /// `None` when the cache listed no records ("no data")
    pub last_used: Option<LastUsedRange>,
    pub modified: usize,
    pub exclusive: usize,
    pub shared: usize,
    pub invalid: usize,
    /// Every listed record, Invalid ones included
    pub total: usize,
}

impl CacheStats {
    pub fn compute(cache_id: CacheId, records: &[CacheLineRecord]) -> Self {
        let last_used = records
            .iter()
            .map(|r| r.last_used)
            .fold(None, |range: Option<LastUsedRange>, value| {
                Some(match range {
                    None => LastUsedRange {
                        min: value,
                        max: value,
                    },
                    Some(range) => LastUsedRange {
                        min: range.min.min(value),
                        max: range.max.max(value),
                    },
                })
            });

        let count = |state: CacheLineState| records.iter().filter(|r| r.status == state).count();

        CacheStats {
            cache_id,
            last_used,
            modified: count(CacheLineState::Modified),
            exclusive: count(CacheLineState::Exclusive),
            shared: count(CacheLineState::Shared),
            invalid: count(CacheLineState::Invalid),
            total: records.len(),
        }
    }

    pub fn count(&self, state: CacheLineState) -> usize {
        match state {
            CacheLineState::Modified => self.modified,
            CacheLineState::Exclusive => self.exclusive,
            CacheLineState::Shared => self.shared,
            CacheLineState::Invalid => self.invalid,
        }
    }
}

/// Statistics for every cache, in snapshot order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatsReport {
    pub caches: Vec<CacheStats>,
}

impl StatsReport {
    pub fn compute(snapshot: &CacheSnapshot) -> Self {
        StatsReport {
            caches: snapshot
                .caches()
                .map(|(id, records)| CacheStats::compute(id, records))
                .collect(),
        }
    }

    pub fn get(&self, cache_id: CacheId) -> Option<&CacheStats> {
        self.caches.iter().find(|s| s.cache_id == cache_id)
    }
}
