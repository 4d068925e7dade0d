// Integration tests for the verification pipeline

use std::path::PathBuf;

use cohcheck::checker::{InvariantClass, Outcome, Violation};
use cohcheck::config::VerifyConfig;
use cohcheck::parser::{parse_snapshot, ParseErrorKind};
use cohcheck::report::render_text;
use cohcheck::snapshot::{CacheId, CacheLineState, LineAddress};
use cohcheck::{verify_file, verify_text, VerifyError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_modified_vs_shared_is_reported() {
    let source = r#"
CACHE CONTENT
Cache 0:
	CacheLine{set_index: 2, tag: 5, last_used: 1, status: M}
Cache 1:
	CacheLine{set_index: 2, tag: 5, last_used: 1, status: S}
CACHE END
"#;

    let verification = verify_text("scenario-1", source, &VerifyConfig::default())
        .expect("Verification failed");

    assert!(!verification.passed());
    let first = &verification.checks.violations[0];
    assert_eq!(
        *first,
        Violation::Conflict {
            invariant: InvariantClass::Modified,
            cache: CacheId(0),
            address: LineAddress {
                tag: 5,
                set_index: 2
            },
            state: CacheLineState::Modified,
            peer: CacheId(1),
            peer_state: CacheLineState::Shared,
        }
    );
}

#[test]
fn test_shared_copies_pass() {
    let source = r#"
CACHE CONTENT
Cache 0:
	CacheLine{set_index: 0, tag: 7, last_used: 3, status: S}
Cache 1:
	CacheLine{set_index: 0, tag: 7, last_used: 8, status: S}
CACHE END
"#;

    let verification = verify_text("scenario-2", source, &VerifyConfig::default())
        .expect("Verification failed");

    assert!(verification.passed(), "{:?}", verification.checks.violations);
}

#[test]
fn test_empty_cache_reports_no_data() {
    let source = "CACHE CONTENT\nCache 5:\nCACHE END\n";

    let verification = verify_text("scenario-3", source, &VerifyConfig::default())
        .expect("Verification failed");

    let stats = verification.stats.get(CacheId(5)).expect("Missing stats");
    assert_eq!(stats.last_used, None);
    assert_eq!(stats.modified, 0);
    assert_eq!(stats.exclusive, 0);
    assert_eq!(stats.shared, 0);
    assert_eq!(stats.total, 0);

    assert!(verification.passed());
    assert!(verification
        .checks
        .outcomes_for(CacheId(5))
        .all(|o| o.outcome == Outcome::Pass));
}

#[test]
fn test_malformed_record_rejects_whole_dump() {
    let source = "CACHE CONTENT\nCache 0:\nCacheLine{set_index: x, tag: 3, last_used: 1, status: M}\nCACHE END\n";

    match verify_text("scenario-4", source, &VerifyConfig::default()) {
        Err(VerifyError::Parse(err)) => {
            assert_eq!(err.line, 3);
            assert!(matches!(err.kind, ParseErrorKind::InvalidNumber { .. }));
            assert!(err.to_string().contains("set_index: x"));
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_clean_fixture() {
    let verification =
        verify_file(&fixture("mesi_clean.out"), &VerifyConfig::default()).expect("Verify failed");

    assert!(verification.passed(), "{:?}", verification.checks.violations);
    assert_eq!(verification.snapshot.len(), 4);
    assert_eq!(verification.snapshot.total_records(), 6);

    let cache0 = verification.stats.get(CacheId(0)).unwrap();
    assert_eq!(cache0.last_used.map(|r| (r.min, r.max)), Some((1041, 1999999)));

    let cache2 = verification.stats.get(CacheId(2)).unwrap();
    assert_eq!(cache2.invalid, 1);
    assert_eq!(cache2.total, 2);

    let text = render_text(&verification);
    assert!(text.contains("Cache 3:\n\tNo data\n"));
    assert!(text.ends_with("PASS: 4 cache(s) verified\n"));
}

#[test]
fn test_violation_fixture_reports_everything() {
    let verification = verify_file(&fixture("mesi_violation.out"), &VerifyConfig::default())
        .expect("Verify failed");

    let found: Vec<String> = verification
        .checks
        .violations
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        found,
        vec![
            "M in cache 0 but S in cache 1 (tag 5, set 2)",
            "E in cache 0 but E in cache 2 (tag 9, set 0)",
            "S in cache 1 but M in cache 0 (tag 5, set 2)",
            "E in cache 2 but E in cache 0 (tag 9, set 0)",
            "Duplicate (tag 1, set 4) in cache 2: 2 lines in S",
        ]
    );

    assert!(verification.checks.cache_passed(CacheId(3)));
    assert!(!verification.checks.cache_passed(CacheId(2)));
}

#[test]
fn test_violation_fixture_fail_fast() {
    let config = VerifyConfig::default().fail_fast();
    let verification =
        verify_file(&fixture("mesi_violation.out"), &config).expect("Verify failed");

    assert_eq!(verification.checks.violations.len(), 1);
    let skipped = verification
        .checks
        .outcomes
        .iter()
        .filter(|o| o.outcome == Outcome::Skipped)
        .count();
    // 4 caches x 3 rules, only the first was evaluated
    assert_eq!(skipped, 11);
}

#[test]
fn test_malformed_fixture() {
    let err = verify_file(&fixture("malformed.out"), &VerifyConfig::default()).unwrap_err();
    match err {
        VerifyError::Parse(parse) => assert_eq!(parse.line, 5),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_banner_cache_lines_are_ignored() {
    let source = r#"
Cache 0 is not busy -> Serve request
Cache 9:
CACHE CONTENT
Cache 1:
CACHE END
Cache 2:
"#;

    let snapshot = parse_snapshot(source).expect("Parsing failed");
    let ids: Vec<_> = snapshot.cache_ids().collect();
    assert_eq!(ids, vec![CacheId(1)]);
}

#[test]
fn test_verification_is_idempotent() {
    let config = VerifyConfig::default();
    let path = fixture("mesi_violation.out");
    let first = verify_file(&path, &config).expect("Verify failed");
    let second = verify_file(&path, &config).expect("Verify failed");

    assert_eq!(first.checks, second.checks);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.snapshot, second.snapshot);
}

#[test]
fn test_fail_fast_unchecked_cache_is_not_passed() {
    let source = r#"
CACHE CONTENT
Cache 0:
	CacheLine{set_index: 0, tag: 1, last_used: 4, status: M}
Cache 1:
	CacheLine{set_index: 0, tag: 1, last_used: 2, status: S}
CACHE END
"#;

    let config = VerifyConfig::default().fail_fast();
    let verification = verify_text("fail-fast", source, &config).expect("Verification failed");
    let checks = &verification.checks;

    assert_eq!(checks.cache_verdict(CacheId(0)), Outcome::Fail { violations: 1 });
    assert_eq!(checks.cache_verdict(CacheId(1)), Outcome::Skipped);
    assert!(!checks.cache_passed(CacheId(0)));
    assert!(!checks.cache_passed(CacheId(1)));
}
