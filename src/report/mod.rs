//! Report rendering for a finished [`Verification`]
//!
//! The text layout follows the console output the simulator's test harness
//! already greps for: a `<<<Statistics>>>` block per cache, a `<<<Tests>>>`
//! block with one PASS/FAIL line per invariant per cache, then a one-line
//! verdict. The JSON form carries the same data for tooling.

use serde::Serialize;

use crate::checker::{CheckOutcome, Outcome, Violation};
use crate::config::CheckMode;
use crate::stats::{CacheStats, StatsReport};
use crate::verify::Verification;

/// Render the human-readable report
pub fn render_text(verification: &Verification) -> String {
    let mut out = String::new();

    out.push_str("<<<Statistics>>>\n");
    for stats in &verification.stats.caches {
        write_stats(&mut out, stats);
    }

    out.push_str("<<<Tests>>>\n");
    let checks = &verification.checks;
    for cache in verification.snapshot.cache_ids() {
        out.push_str(&format!("Testing cache {}\n", cache));
        for outcome in checks.outcomes_for(cache) {
            out.push_str(&format!(
                "\t{}: {}\n",
                outcome.outcome.label(),
                outcome.invariant
            ));
            if matches!(outcome.outcome, Outcome::Fail { .. }) {
                for violation in checks.violations_under(cache, outcome.invariant) {
                    out.push_str(&format!("\t\t{}\n", violation));
                }
            }
        }
    }

    out.push_str("<<<Result>>>\n");
    if verification.passed() {
        out.push_str(&format!(
            "PASS: {} cache(s) verified\n",
            verification.snapshot.len()
        ));
    } else {
        out.push_str(&format!("FAIL: {} violation(s)", checks.violations.len()));
        if checks.mode == CheckMode::FailFast {
            out.push_str(" (stopped at first)");
        }
        out.push('\n');
    }

    out
}

fn write_stats(out: &mut String, stats: &CacheStats) {
    out.push_str(&format!("Cache {}:\n", stats.cache_id));
    match stats.last_used {
        Some(range) => {
            out.push_str(&format!("\tMin last used: {}\n", range.min));
            out.push_str(&format!("\tMax last used: {}\n", range.max));
        }
        None => out.push_str("\tNo data\n"),
    }
    out.push('\n');
    out.push_str(&format!("\tModified: {}\n", stats.modified));
    out.push_str(&format!("\tExclusive: {}\n", stats.exclusive));
    out.push_str(&format!("\tShared: {}\n", stats.shared));
    out.push_str(&format!("\tInvalid: {}\n", stats.invalid));
    out.push('\n');
    out.push_str(&format!("\tTotal: {}\n", stats.total));
    out.push('\n');
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    passed: bool,
    mode: CheckMode,
    statistics: &'a StatsReport,
    results: &'a [CheckOutcome],
    violations: &'a [Violation],
}

/// Render the machine-readable report
pub fn render_json(verification: &Verification) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        source: &verification.source,
        passed: verification.passed(),
        mode: verification.checks.mode,
        statistics: &verification.stats,
        results: &verification.checks.outcomes,
        violations: &verification.checks.violations,
    };
    serde_json::to_string_pretty(&report)
}
