use pua_config::{
    consumed_pointers, load_layered_yaml_from_strings, report_unused_keys, LoggingConfig,
    UnusedKeyPolicy,
};

/// scenario_unused_keys_warn_or_fail
///
/// Validates:
/// 1) Unused keys are detected in WARN mode but do not error.
/// 2) Unused keys cause failure in FAIL mode.
/// 3) Only the exact consumed leaves are covered, not their siblings.
/// 4) Deterministic ordering of unused pointers.

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let yaml = r#"
engine:
  record_steps: true

unused_section:
  foo: 123
  bar: 456
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert!(!report.is_clean());
    assert_eq!(
        report.unused_leaf_pointers,
        vec![
            "/unused_section/bar".to_string(),
            "/unused_section/foo".to_string()
        ]
    );
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let yaml = r#"
engine:
  tie_break: DROPOFF_FIRST
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let result = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail);

    let msg = format!("{:?}", result.err().expect("fail policy must error"));
    assert!(msg.contains("CONFIG_UNUSED_KEYS"));
    assert!(msg.contains("/engine/tie_break"));
}

#[test]
fn consumed_leaf_does_not_cover_siblings() {
    let yaml = r#"
logging:
  filter: debug
  format: json
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(report.unused_leaf_pointers, vec!["/logging/format".to_string()]);
}

#[test]
fn registry_is_reported_sorted_and_complete() {
    let loaded = load_layered_yaml_from_strings(&["{}"]).unwrap();
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap();

    let mut expected: Vec<String> = consumed_pointers().iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(report.consumed_prefixes, expected);
    assert!(report.is_clean());
}

#[test]
fn logging_section_is_readable_from_loaded_config() {
    let loaded = load_layered_yaml_from_strings(&["logging:\n  filter: \"warn,pua_accrual=debug\"\n"]).unwrap();
    let cfg = LoggingConfig::from_config_json(&loaded.config_json).unwrap();
    assert_eq!(cfg.filter, "warn,pua_accrual=debug");
}
