//! Invariant table
//!
//! Every coherence invariant has the same shape: addresses a subject cache
//! holds in one state must not appear in any peer cache under a set of
//! forbidden states. A protocol is therefore fully described by a list of
//! [`InvariantRule`]s, and supporting another protocol means adding a table
//! here rather than another check routine.

use serde::Serialize;
use std::fmt;

use crate::config::Protocol;
use crate::snapshot::CacheLineState;

/// The invariant family a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvariantClass {
    /// A dirty line has a single owner
    Modified,
    /// A clean exclusive line has a single owner
    Exclusive,
    /// Shared copies only coexist with other shared copies
    Shared,
}

impl InvariantClass {
    /// Name printed in the test-results block
    pub fn test_name(self) -> &'static str {
        match self {
            InvariantClass::Modified => "test_modified",
            InvariantClass::Exclusive => "test_exclusive",
            InvariantClass::Shared => "test_shared",
        }
    }
}

impl fmt::Display for InvariantClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.test_name())
    }
}

/// One row of the invariant table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantRule {
    pub class: InvariantClass,
    /// State the subject cache holds the address in
    pub subject: CacheLineState,
    /// States no peer cache may hold the same address in, in reporting order
    pub forbidden_peers: &'static [CacheLineState],
}

static MESI_RULES: [InvariantRule; 3] = [
    InvariantRule {
        class: InvariantClass::Modified,
        subject: CacheLineState::Modified,
        forbidden_peers: &[
            CacheLineState::Modified,
            CacheLineState::Exclusive,
            CacheLineState::Shared,
        ],
    },
    InvariantRule {
        class: InvariantClass::Exclusive,
        subject: CacheLineState::Exclusive,
        forbidden_peers: &[
            CacheLineState::Modified,
            CacheLineState::Exclusive,
            CacheLineState::Shared,
        ],
    },
    InvariantRule {
        class: InvariantClass::Shared,
        subject: CacheLineState::Shared,
        forbidden_peers: &[CacheLineState::Modified, CacheLineState::Exclusive],
    },
];

/// The invariant table applied by the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoherenceRules {
    rules: &'static [InvariantRule],
}

impl CoherenceRules {
    pub fn for_protocol(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Mesi => CoherenceRules { rules: &MESI_RULES },
        }
    }

    pub fn rules(&self) -> &'static [InvariantRule] {
        self.rules
    }

    pub fn rule(&self, class: InvariantClass) -> Option<&'static InvariantRule> {
        self.rules.iter().find(|rule| rule.class == class)
    }
}

impl Default for CoherenceRules {
    fn default() -> Self {
        Self::for_protocol(Protocol::default())
    }
}
