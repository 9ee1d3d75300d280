//! Configuration Tests.
//!
//! Covers policy name parsing, validation order and error messages, and
//! loading configurations from JSON.

use std::io::Write;

use csim_core::common::{ConfigError, SimError};
use csim_core::config::{CacheConfig, ReplacementPolicy};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Policy names
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("FIFO", ReplacementPolicy::Fifo)]
#[case("fifo", ReplacementPolicy::Fifo)]
#[case("Fifo", ReplacementPolicy::Fifo)]
#[case("LRU", ReplacementPolicy::Lru)]
#[case("lru", ReplacementPolicy::Lru)]
fn parses_policy_name(#[case] name: &str, #[case] expected: ReplacementPolicy) {
    assert_eq!(name.parse::<ReplacementPolicy>(), Ok(expected));
}

#[rstest]
#[case("")]
#[case("MRU")]
#[case("LRU ")]
#[case("random")]
fn rejects_unknown_policy(#[case] name: &str) {
    assert_eq!(
        name.parse::<ReplacementPolicy>(),
        Err(ConfigError::UnknownPolicy(name.to_owned()))
    );
}

#[test]
fn policy_displays_canonical_name() {
    assert_eq!(ReplacementPolicy::Fifo.to_string(), "FIFO");
    assert_eq!(ReplacementPolicy::Lru.to_string(), "LRU");
}

// ══════════════════════════════════════════════════════════
// 2. Validation
// ══════════════════════════════════════════════════════════

#[test]
fn valid_config_yields_geometry() {
    let (geometry, policy) = CacheConfig::new(16, 4, 32, ReplacementPolicy::Lru)
        .validate()
        .unwrap();

    assert_eq!(policy, ReplacementPolicy::Lru);
    assert_eq!(geometry.sets(), 16);
    assert_eq!(geometry.ways(), 4);
    assert_eq!(geometry.line_bytes(), 32);
    assert_eq!(geometry.tag_bits(), 64 - 4 - 5);
}

#[test]
fn default_config_is_rejected() {
    assert_eq!(
        CacheConfig::default().validate(),
        Err(ConfigError::Zero { name: "S" })
    );
}

/// Geometry is checked before the policy.
#[test]
fn geometry_errors_take_precedence() {
    let config = CacheConfig {
        sets: 3,
        ways: 1,
        line_bytes: 4,
        policy: None,
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NotPowerOfTwo {
            name: "S",
            value: 3
        })
    );
}

#[test]
fn missing_policy_is_rejected() {
    let config = CacheConfig {
        sets: 1,
        ways: 1,
        line_bytes: 1,
        policy: None,
    };
    assert_eq!(config.validate(), Err(ConfigError::MissingPolicy));
}

#[rstest]
#[case(ConfigError::Zero { name: "K" }, "K must be > 0")]
#[case(
    ConfigError::NotPowerOfTwo { name: "B", value: 12 },
    "B must be a power of 2 (got 12)"
)]
#[case(
    ConfigError::UnknownPolicy("MRU".into()),
    "unknown eviction policy 'MRU' (one of 'FIFO', 'LRU')"
)]
#[case(
    ConfigError::MissingPolicy,
    "eviction policy is required (one of 'FIFO', 'LRU')"
)]
fn error_messages(#[case] err: ConfigError, #[case] message: &str) {
    assert_eq!(err.to_string(), message);
}

// ══════════════════════════════════════════════════════════
// 3. JSON
// ══════════════════════════════════════════════════════════

#[test]
fn deserializes_full_config() {
    let config: CacheConfig =
        serde_json::from_str(r#"{ "sets": 8, "ways": 2, "line_bytes": 64, "policy": "LRU" }"#)
            .unwrap();
    assert_eq!(config, CacheConfig::new(8, 2, 64, ReplacementPolicy::Lru));
}

#[rstest]
#[case(r#""FIFO""#, ReplacementPolicy::Fifo)]
#[case(r#""fifo""#, ReplacementPolicy::Fifo)]
#[case(r#""Lru""#, ReplacementPolicy::Lru)]
fn deserializes_policy_aliases(#[case] json: &str, #[case] expected: ReplacementPolicy) {
    assert_eq!(
        serde_json::from_str::<ReplacementPolicy>(json).unwrap(),
        expected
    );
}

/// Missing fields fall back to "unspecified" so flags can fill them in.
#[test]
fn partial_config_leaves_defaults() {
    let config: CacheConfig = serde_json::from_str(r#"{ "ways": 4 }"#).unwrap();
    assert_eq!(
        config,
        CacheConfig {
            ways: 4,
            ..CacheConfig::default()
        }
    );
}

#[test]
fn unknown_field_is_rejected() {
    assert!(serde_json::from_str::<CacheConfig>(r#"{ "assoc": 4 }"#).is_err());
}

#[test]
fn serializes_canonical_policy_name() {
    let json = serde_json::to_string(&CacheConfig::new(1, 1, 1, ReplacementPolicy::Fifo)).unwrap();
    assert_eq!(
        json,
        r#"{"sets":1,"ways":1,"line_bytes":1,"policy":"FIFO"}"#
    );
}

#[test]
fn loads_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "sets": 4, "ways": 1, "line_bytes": 16, "policy": "fifo" }}"#).unwrap();

    let config = CacheConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config, CacheConfig::new(4, 1, 16, ReplacementPolicy::Fifo));
}

#[test]
fn malformed_config_file_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "sets = 4").unwrap();

    let err = CacheConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, SimError::ConfigFile { .. }));
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = CacheConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SimError::Open { .. }));
}
