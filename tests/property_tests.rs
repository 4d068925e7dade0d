// Property tests for parsing and invariant checking

use cohcheck::checker::{check_snapshot, Violation};
use cohcheck::parser::parse_snapshot;
use cohcheck::snapshot::{CacheId, CacheLineRecord, CacheLineState, CacheSnapshot, LineAddress};
use cohcheck::stats::StatsReport;
use proptest::prelude::*;

fn state() -> impl Strategy<Value = CacheLineState> {
    prop_oneof![
        Just(CacheLineState::Modified),
        Just(CacheLineState::Exclusive),
        Just(CacheLineState::Shared),
        Just(CacheLineState::Invalid),
    ]
}

// Small address space so that caches collide often
fn record() -> impl Strategy<Value = CacheLineRecord> {
    (0u64..4, 0u64..4, 0u64..10_000, state()).prop_map(|(set_index, tag, last_used, status)| {
        CacheLineRecord {
            set_index,
            tag,
            last_used,
            status,
        }
    })
}

fn snapshot() -> impl Strategy<Value = CacheSnapshot> {
    // Reversed so that first-seen order differs from numeric order
    prop::collection::btree_map(0u32..8, prop::collection::vec(record(), 0..12), 0..5).prop_map(
        |caches| {
            CacheSnapshot::from_caches(caches.into_iter().rev().map(|(id, r)| (CacheId(id), r)))
        },
    )
}

fn holders(snapshot: &CacheSnapshot, address: LineAddress) -> Vec<(CacheId, CacheLineState)> {
    snapshot
        .caches()
        .flat_map(|(id, records)| {
            records
                .iter()
                .filter(move |r| r.address() == address && r.status.is_valid())
                .map(move |r| (id, r.status))
        })
        .collect()
}

proptest! {
    #[test]
    fn dump_round_trips(snap in snapshot()) {
        let reparsed = parse_snapshot(&snap.to_dump()).unwrap();
        prop_assert_eq!(reparsed, snap);
    }

    #[test]
    fn check_is_idempotent(snap in snapshot()) {
        prop_assert_eq!(check_snapshot(&snap), check_snapshot(&snap));
    }

    #[test]
    fn conflicts_are_reported_from_both_sides(snap in snapshot()) {
        let report = check_snapshot(&snap);
        for v in &report.violations {
            if let Violation::Conflict { cache, address, state, peer, peer_state, .. } = v {
                let mirrored = report.violations.iter().any(|other| matches!(
                    other,
                    Violation::Conflict { cache: c, address: a, state: s, peer: p, peer_state: ps, .. }
                        if c == peer && a == address && s == peer_state && p == cache && ps == state
                ));
                prop_assert!(mirrored, "no mirror for {}", v);
            }
        }
    }

    #[test]
    fn clean_means_protocol_holds(snap in snapshot()) {
        let report = check_snapshot(&snap);
        for (id, records) in snap.caches() {
            for r in records.iter().filter(|r| r.status.is_valid()) {
                let others: Vec<_> = holders(&snap, r.address())
                    .into_iter()
                    .filter(|(other, _)| *other != id)
                    .collect();
                let legal = match r.status {
                    CacheLineState::Shared => others.iter().all(|(_, s)| *s == CacheLineState::Shared),
                    _ => others.is_empty(),
                };
                if !legal {
                    prop_assert!(!report.is_clean());
                    prop_assert!(!report.cache_passed(id));
                }
            }
        }
    }

    #[test]
    fn disjoint_caches_never_conflict(
        sets in prop::collection::vec(prop::collection::vec(state(), 0..6), 0..5)
    ) {
        // Cache i only uses set_index i, and tags are unique within each cache
        let snap = CacheSnapshot::from_caches(sets.into_iter().enumerate().map(|(i, states)| {
            let records: Vec<CacheLineRecord> = states
                .into_iter()
                .enumerate()
                .map(|(tag, status)| CacheLineRecord {
                    set_index: i as u64,
                    tag: tag as u64,
                    last_used: tag as u64,
                    status,
                })
                .collect();
            (CacheId(i as u32), records)
        }));
        prop_assert!(check_snapshot(&snap).is_clean());
    }

    #[test]
    fn stats_totals_match_records(snap in snapshot()) {
        let stats = StatsReport::compute(&snap);
        prop_assert_eq!(stats.caches.len(), snap.len());
        for s in &stats.caches {
            prop_assert_eq!(s.modified + s.exclusive + s.shared + s.invalid, s.total);
            prop_assert_eq!(s.last_used.is_none(), s.total == 0);
            if let Some(range) = s.last_used {
                prop_assert!(range.min <= range.max);
            }
        }
    }
}
