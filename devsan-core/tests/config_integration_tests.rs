// devsan-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tempfile::{Builder, NamedTempFile};

use devsan_core::config::{self, Rule, RuleSet, SafetyLimits};

#[test]
fn test_load_default_rules() {
    let set = RuleSet::load_default_rules().unwrap();
    let types: Vec<&str> = set.rules.iter().map(|r| r.rule_type.as_str()).collect();
    assert_eq!(types, vec!["email", "apiKey", "ipAddress"]);
    assert_eq!(set.limits, SafetyLimits::default());
    assert!(set.rules.iter().all(|r| devsan_core::is_safe(&r.pattern)));
}

#[test]
fn test_default_limits_are_fixed() {
    let limits = SafetyLimits::default();
    assert_eq!(limits.max_iterations, 100_000);
    assert_eq!(limits.timeout, Duration::from_millis(5000));
    assert_eq!(limits.max_iterations, devsan_core::MAX_ITERATIONS);
    assert_eq!(limits.timeout, Duration::from_millis(devsan_core::MAX_TIME_MS));
}

#[test]
fn test_load_from_yaml_file() -> Result<()> {
    let yaml_content = r#"
limits:
  max_iterations: 500
  timeout_ms: 1000
rules:
  - type: ticket
    pattern: 'TICKET-\d+'
    replacement: "[TICKET]"
  - pattern: 'internal\.corp'
    replacement: "[HOST]"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let set = RuleSet::load_from_file(file.path())?;

    assert_eq!(set.rules.len(), 2);
    assert_eq!(set.rules[0], Rule::new("ticket", r"TICKET-\d+", "[TICKET]"));
    assert_eq!(set.rules[1].rule_type, "");
    assert_eq!(set.limits.max_iterations, 500);
    assert_eq!(set.limits.timeout, Duration::from_millis(1000));
    Ok(())
}

#[test]
fn test_load_bare_json_list() -> Result<()> {
    let json_content = r#"[
        {"type": "email", "pattern": "\\w+@\\w+\\.com", "replacement": "[EMAIL]"},
        {"type": "custom", "pattern": "", "replacement": "[REDACTED]"}
    ]"#;
    let mut file = Builder::new().suffix(".json").tempfile()?;
    file.write_all(json_content.as_bytes())?;
    let set = RuleSet::load_from_file(file.path())?;

    assert_eq!(set.rules.len(), 2);
    assert_eq!(set.rules[0].pattern, r"\w+@\w+\.com");
    assert!(set.rules[1].is_inert());
    assert_eq!(set.limits, SafetyLimits::default());
    Ok(())
}

#[test]
fn test_load_missing_file_fails_with_context() {
    let err = RuleSet::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read rules file"));
}

#[test]
fn test_load_malformed_file_fails() -> Result<()> {
    let mut file = Builder::new().suffix(".json").tempfile()?;
    file.write_all(b"{ not json")?;
    let err = RuleSet::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse rules file"));
    Ok(())
}

#[test]
fn test_merge_rules_appends_in_order() -> Result<()> {
    let defaults = RuleSet::load_default_rules()?;
    let user = RuleSet::new(vec![
        Rule::new("email", "x", "[X]"),
        Rule::new("ticket", r"T-\d+", "[T]"),
    ]);
    let merged = config::merge_rules(defaults, Some(user));

    let types: Vec<&str> = merged.rules.iter().map(|r| r.rule_type.as_str()).collect();
    assert_eq!(types, vec!["email", "apiKey", "ipAddress", "email", "ticket"]);
    Ok(())
}

#[test]
fn test_merge_rules_no_user_rules() -> Result<()> {
    let defaults = RuleSet::load_default_rules()?;
    let merged = config::merge_rules(defaults.clone(), None);
    assert_eq!(merged, defaults);
    Ok(())
}

#[test]
fn test_set_active_rules_disable_and_enable() -> Result<()> {
    let mut set = RuleSet::load_default_rules()?;
    set.set_active_rules(&[], &["apiKey".to_string(), "nonexistent".to_string()]);
    let types: Vec<&str> = set.rules.iter().map(|r| r.rule_type.as_str()).collect();
    assert_eq!(types, vec!["email", "ipAddress"]);

    let mut set = RuleSet::load_default_rules()?;
    set.set_active_rules(&["ipAddress".to_string()], &[]);
    assert_eq!(set.rules.len(), 1);
    assert_eq!(set.rules[0].rule_type, "ipAddress");
    Ok(())
}
