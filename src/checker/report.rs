//! Checker results
//!
//! A violation is the checker's designed output, not a software error, so it
//! is modeled as data ([`Violation`]) and collected into a [`CheckReport`].
//! Callers that want `?`-style propagation can turn a report into a
//! `Result` with [`CheckReport::into_result`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::rules::InvariantClass;
use crate::config::CheckMode;
use crate::snapshot::{CacheId, CacheLineState, LineAddress};

/// A single detected coherence conflict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The same address listed more than once under one state in one cache
    Duplicate {
        invariant: InvariantClass,
        cache: CacheId,
        address: LineAddress,
        state: CacheLineState,
        occurrences: usize,
    },

    /// A peer cache holds the subject's address in a forbidden state
    Conflict {
        invariant: InvariantClass,
        cache: CacheId,
        address: LineAddress,
        state: CacheLineState,
        peer: CacheId,
        peer_state: CacheLineState,
    },
}

impl Violation {
    pub fn invariant(&self) -> InvariantClass {
        match self {
            Violation::Duplicate { invariant, .. } | Violation::Conflict { invariant, .. } => {
                *invariant
            }
        }
    }

    /// The subject cache the violation was found under
    pub fn cache(&self) -> CacheId {
        match self {
            Violation::Duplicate { cache, .. } | Violation::Conflict { cache, .. } => *cache,
        }
    }

    pub fn address(&self) -> LineAddress {
        match self {
            Violation::Duplicate { address, .. } | Violation::Conflict { address, .. } => *address,
        }
    }

    /// Whether `cache` is the subject or the conflicting peer
    pub fn involves(&self, cache: CacheId) -> bool {
        match self {
            Violation::Duplicate { cache: subject, .. } => *subject == cache,
            Violation::Conflict {
                cache: subject,
                peer,
                ..
            } => *subject == cache || *peer == cache,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Duplicate {
                cache,
                address,
                state,
                occurrences,
                ..
            } => write!(
                f,
                "Duplicate ({}) in cache {}: {} lines in {}",
                address, cache, occurrences, state
            ),
            Violation::Conflict {
                cache,
                address,
                state,
                peer,
                peer_state,
                ..
            } => write!(
                f,
                "{} in cache {} but {} in cache {} ({})",
                state, cache, peer_state, peer, address
            ),
        }
    }
}

/// Verdict of one invariant for one subject cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail { violations: usize },
    /// Not evaluated because a fail-fast run already stopped
    Skipped,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Pass => "PASS",
            Outcome::Fail { .. } => "FAIL",
            Outcome::Skipped => "SKIP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub cache: CacheId,
    pub invariant: InvariantClass,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Everything one checker run found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub mode: CheckMode,
    /// Violations in discovery order
    pub violations: Vec<Violation>,
    /// One entry per (cache, invariant), caches in snapshot order
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations found with `cache` as the subject
    pub fn violations_for(&self, cache: CacheId) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter().filter(move |v| v.cache() == cache)
    }

    /// Violations found under one invariant for one subject cache
    pub fn violations_under(
        &self,
        cache: CacheId,
        invariant: InvariantClass,
    ) -> impl Iterator<Item = &Violation> + '_ {
        self.violations_for(cache)
            .filter(move |v| v.invariant() == invariant)
    }

    pub fn outcomes_for(&self, cache: CacheId) -> impl Iterator<Item = &CheckOutcome> + '_ {
        self.outcomes.iter().filter(move |o| o.cache == cache)
    }

    /// Combined verdict for `cache`: any failure wins, then any skipped rule
    pub fn cache_verdict(&self, cache: CacheId) -> Outcome {
        let mut violations = 0;
        let mut skipped = false;
        for o in self.outcomes_for(cache) {
            match o.outcome {
                Outcome::Fail { violations: n } => violations += n,
                Outcome::Skipped => skipped = true,
                Outcome::Pass => {}
            }
        }
        if violations > 0 {
            Outcome::Fail { violations }
        } else if skipped {
            Outcome::Skipped
        } else {
            Outcome::Pass
        }
    }

    /// Whether every invariant was evaluated and held for `cache`
    pub fn cache_passed(&self, cache: CacheId) -> bool {
        self.cache_verdict(cache) == Outcome::Pass
    }

    pub fn into_result(self) -> Result<(), CoherenceFailure> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(CoherenceFailure {
                violations: self.violations,
            })
        }
    }
}

/// Error form of a report with at least one violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} coherence violation(s), first: {}", .violations.len(), first(.violations))]
pub struct CoherenceFailure {
    pub violations: Vec<Violation>,
}

fn first(violations: &[Violation]) -> String {
    violations
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}
