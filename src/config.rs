//! Run configuration and dump-format constants

use clap::ValueEnum;
use serde::Serialize;

/// Marker line opening a cache-content section
pub const SECTION_OPEN: &str = "CACHE CONTENT";

/// Marker line closing a cache-content section
pub const SECTION_CLOSE: &str = "CACHE END";

/// Prefix of a cache-identifying line (`Cache <id>:`)
pub const CACHE_HEADER: &str = "Cache ";

/// Prefix of a record literal
pub const RECORD_PREFIX: &str = "CacheLine";

/// How much of the snapshot the checker evaluates once a violation is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Evaluate every rule for every cache pair
    #[default]
    Exhaustive,
    /// Stop at the first violation; remaining checks are reported as skipped
    FailFast,
}

/// Coherence protocol whose invariant table is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    #[default]
    Mesi,
}

/// Report format written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for one verification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyConfig {
    pub mode: CheckMode,
    pub protocol: Protocol,
    pub format: OutputFormat,
}

impl VerifyConfig {
    pub fn fail_fast(mut self) -> Self {
        self.mode = CheckMode::FailFast;
        self
    }
}
