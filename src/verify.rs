//! End-to-end verification of one snapshot dump
//!
//! Parse, then compute statistics and run the checker over the same snapshot.
//! A format error stops everything: no statistics or check results are
//! produced from a dump that did not parse.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::checker::{CheckReport, Checker};
use crate::config::VerifyConfig;
use crate::parser::{ParseError, SnapshotParser};
use crate::snapshot::CacheSnapshot;
use crate::stats::StatsReport;

/// Reasons a dump could not be verified at all
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result of verifying one dump
#[derive(Debug, Clone)]
pub struct Verification {
    /// Where the dump came from, for reports
    pub source: String,
    pub snapshot: CacheSnapshot,
    pub stats: StatsReport,
    pub checks: CheckReport,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.checks.is_clean()
    }
}

/// Verify a dump held in memory
pub fn verify_text(
    source: impl Into<String>,
    text: &str,
    config: &VerifyConfig,
) -> Result<Verification, VerifyError> {
    let source = source.into();
    let snapshot = SnapshotParser::parse_str(text)?;
    let stats = StatsReport::compute(&snapshot);
    let checks = Checker::from_config(config).check(&snapshot);

    info!(
        source = %source,
        caches = snapshot.len(),
        violations = checks.violations.len(),
        "verification finished"
    );

    Ok(Verification {
        source,
        snapshot,
        stats,
        checks,
    })
}

/// Read and verify a dump file
pub fn verify_file(path: &Path, config: &VerifyConfig) -> Result<Verification, VerifyError> {
    let text = fs::read_to_string(path).map_err(|source| VerifyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    verify_text(path.display().to_string(), &text, config)
}
