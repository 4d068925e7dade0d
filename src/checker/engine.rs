//! Cross-cache invariant evaluation
//!
//! [`Checker::check`] indexes every cache once, then runs one parameterized
//! routine per (subject cache, rule): a duplicate scan of the subject's own
//! lines in the rule's state, followed by an intersection against each peer's
//! lines in each forbidden state.
//!
//! # Ordering
//!
//! Subjects and peers are visited in snapshot key order, forbidden states in
//! table order, and addresses in the order the subject listed them. The
//! ordering only affects how violations are reported; the invariant itself
//! is symmetric over cache pairs.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use super::report::{CheckOutcome, CheckReport, Outcome, Violation};
use super::rules::{CoherenceRules, InvariantRule};
use crate::config::{CheckMode, VerifyConfig};
use crate::snapshot::{CacheId, CacheLineRecord, CacheLineState, CacheSnapshot, LineAddress};

/// Addresses one cache holds in one state
#[derive(Debug, Default)]
struct StateLines {
    /// Every listed address, in listing order, duplicates included
    listed: Vec<LineAddress>,
    members: FxHashSet<LineAddress>,
}

/// Per-state view of one cache's records; Invalid lines are not indexed
#[derive(Debug, Default)]
struct CacheIndex {
    by_state: FxHashMap<CacheLineState, StateLines>,
}

impl CacheIndex {
    fn build(records: &[CacheLineRecord]) -> Self {
        let mut index = CacheIndex::default();
        for record in records.iter().filter(|r| r.status.is_valid()) {
            let lines = index.by_state.entry(record.status).or_default();
            lines.listed.push(record.address());
            lines.members.insert(record.address());
        }
        index
    }

    fn listed(&self, state: CacheLineState) -> &[LineAddress] {
        self.by_state
            .get(&state)
            .map(|lines| lines.listed.as_slice())
            .unwrap_or(&[])
    }

    fn holds(&self, state: CacheLineState, address: &LineAddress) -> bool {
        self.by_state
            .get(&state)
            .is_some_and(|lines| lines.members.contains(address))
    }
}

/// Coherence-invariant checker
#[derive(Debug, Clone, Copy, Default)]
pub struct Checker {
    rules: CoherenceRules,
    mode: CheckMode,
}

impl Checker {
    pub fn new(rules: CoherenceRules, mode: CheckMode) -> Self {
        Checker { rules, mode }
    }

    pub fn from_config(config: &VerifyConfig) -> Self {
        Self::new(CoherenceRules::for_protocol(config.protocol), config.mode)
    }

    /// Evaluate every rule for every subject cache against every peer
    pub fn check(&self, snapshot: &CacheSnapshot) -> CheckReport {
        let indexes: Vec<(CacheId, CacheIndex)> = snapshot
            .caches()
            .map(|(id, records)| (id, CacheIndex::build(records)))
            .collect();

        let mut violations = Vec::new();
        let mut outcomes = Vec::with_capacity(indexes.len() * self.rules.rules().len());
        let mut stopped = false;

        for (subject, index) in &indexes {
            for rule in self.rules.rules() {
                if stopped {
                    outcomes.push(CheckOutcome {
                        cache: *subject,
                        invariant: rule.class,
                        outcome: Outcome::Skipped,
                    });
                    continue;
                }

                let mut found = check_rule(rule, *subject, index, &indexes);
                if self.mode == CheckMode::FailFast && !found.is_empty() {
                    found.truncate(1);
                    stopped = true;
                }

                debug!(
                    cache = %subject,
                    invariant = %rule.class,
                    violations = found.len(),
                    "rule evaluated"
                );

                let outcome = if found.is_empty() {
                    Outcome::Pass
                } else {
                    Outcome::Fail {
                        violations: found.len(),
                    }
                };
                outcomes.push(CheckOutcome {
                    cache: *subject,
                    invariant: rule.class,
                    outcome,
                });
                violations.extend(found);
            }
        }

        info!(
            caches = indexes.len(),
            violations = violations.len(),
            "coherence check finished"
        );

        CheckReport {
            mode: self.mode,
            violations,
            outcomes,
        }
    }
}

/// Run one rule with `subject` as the subject cache
fn check_rule(
    rule: &InvariantRule,
    subject: CacheId,
    index: &CacheIndex,
    all: &[(CacheId, CacheIndex)],
) -> Vec<Violation> {
    let listed = index.listed(rule.subject);
    let mut violations = Vec::new();

    let mut counts: FxHashMap<LineAddress, usize> = FxHashMap::default();
    for address in listed {
        *counts.entry(*address).or_insert(0) += 1;
    }

    // Distinct addresses, first occurrence order
    let mut seen = FxHashSet::default();
    let distinct: Vec<LineAddress> = listed
        .iter()
        .copied()
        .filter(|address| seen.insert(*address))
        .collect();

    for address in &distinct {
        let occurrences = counts.get(address).copied().unwrap_or(0);
        if occurrences > 1 {
            violations.push(Violation::Duplicate {
                invariant: rule.class,
                cache: subject,
                address: *address,
                state: rule.subject,
                occurrences,
            });
        }
    }

    for (peer, peer_index) in all.iter().filter(|(id, _)| *id != subject) {
        for peer_state in rule.forbidden_peers {
            for address in distinct
                .iter()
                .filter(|address| peer_index.holds(*peer_state, address))
            {
                violations.push(Violation::Conflict {
                    invariant: rule.class,
                    cache: subject,
                    address: *address,
                    state: rule.subject,
                    peer: *peer,
                    peer_state: *peer_state,
                });
            }
        }
    }

    violations
}

/// Check a snapshot with the default MESI table, evaluating every rule
pub fn check_snapshot(snapshot: &CacheSnapshot) -> CheckReport {
    Checker::default().check(snapshot)
}
