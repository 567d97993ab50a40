use std::fs;

use adqa::cmd::qa::load_config;
use adqa::domain::ad::Checks;
use adqa::domain::error::ConfigError;
use tempfile::tempdir;

#[test]
fn loads_yaml_config_with_default_checks() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("qa.yml");
    fs::write(
        &path,
        r#"
expected_values:
  ad_name: TestAd1
  landing_page: "https://example.com/page"
  cta: LEARN_MORE
  cgens:
    NA: 1234
    LATAM: 1235
  campaigns:
    campaign1: [adset1, adset2]
    campaign2: [adset2]
ad_search_key: TestAd
"#,
    )
    .expect("write config");

    let config = load_config(&path).expect("config");
    assert_eq!(config.effective_checks(), Checks::default());
    assert_eq!(config.expected_values.cgens["LATAM"], 1235);
    assert!(config.expected_values.campaigns["campaign1"].contains("adset2"));
}

#[test]
fn schema_errors_are_all_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("qa.json");
    fs::write(
        &path,
        r#"{"expected_values": {"ad_name": "TestAd1", "landing_page": "lp", "cta": "LEARN_MORE", "cgens": {}, "campaigns": {}}, "checks": {"landing_page": "yes", "unknown": true}}"#,
    )
    .expect("write config");

    let error = load_config(&path).expect_err("invalid config");
    let errors = match error {
        ConfigError::Schema { errors } => errors,
        other => panic!("expected schema error, got {other}"),
    };
    assert!(errors.iter().any(|entry| entry.path == "$"));
    assert!(errors.iter().all(|entry| entry.path != "$.checks"));
    assert!(
        errors
            .iter()
            .any(|entry| entry.path == "$.checks.landing_page")
    );
}

#[test]
fn extra_metadata_keys_are_ignored() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("qa.yaml");
    fs::write(
        &path,
        r#"
version: 2
owner: growth-team
expected_values:
  ad_name: TestAd1
  landing_page: lp
  cta: LEARN_MORE
  cgens: {}
  campaigns:
    c1: [a1]
  note: spring launch
checks:
  cta: false
  headline: true
ad_search_key: TestAd
"#,
    )
    .expect("write config");

    let config = load_config(&path).expect("config");
    assert!(!config.effective_checks().cta);
    assert_eq!(config.expected_values.ad_name, "TestAd1");
}

#[test]
fn malformed_json_is_a_read_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("qa.json");
    fs::write(&path, "{\"expected_values\":").expect("write config");

    let error = load_config(&path).expect_err("malformed config");
    assert!(matches!(error, ConfigError::Read { .. }));
    assert!(error.to_string().starts_with("failed to read json config"));
}
