use std::fs;

use sba_cli::config::{default_options_toml, load_options, parse_options, unknown_child_policy};
use sba_model::{ConversionOptions, UnknownChildPolicy};
use tempfile::TempDir;

#[test]
fn partial_config_keeps_other_defaults() {
    let options = parse_options(
        r#"
location_code = "123456"
unknown_children = "reject"

[training]
city = "Ames"
"#,
    )
    .expect("parse");

    let defaults = ConversionOptions::default();
    assert_eq!(options.location_code, "123456");
    assert_eq!(options.unknown_children, UnknownChildPolicy::Reject);
    assert_eq!(options.training.city, "Ames");
    assert_eq!(options.training.state, defaults.training.state);
    assert_eq!(options.session_type, defaults.session_type);
}

#[test]
fn default_toml_parses_back_to_defaults() {
    let text = default_options_toml().expect("serialize");
    assert_eq!(parse_options(&text).expect("parse"), ConversionOptions::default());
}

#[test]
fn config_files_are_optional_but_must_be_valid() {
    assert_eq!(load_options(None).expect("defaults"), ConversionOptions::default());

    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("sba.toml");
    fs::write(&path, "notes_max_len = \"many\"\n").expect("write");
    let err = load_options(Some(&path)).expect_err("bad type");
    assert!(format!("{err:#}").contains("sba.toml"));

    let missing = dir.path().join("missing.toml");
    assert!(load_options(Some(&missing)).is_err());
}

#[test]
fn fix_policy_comes_from_config_unless_flagged() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("sba.toml");
    let options = ConversionOptions::new()
        .with_unknown_children(UnknownChildPolicy::Reject)
        .with_min_counseling_date("2024-10-01");
    fs::write(&path, toml::to_string_pretty(&options).expect("serialize")).expect("write");

    assert_eq!(load_options(Some(&path)).expect("load"), options);
    assert_eq!(
        unknown_child_policy(Some(&path), None).expect("policy"),
        UnknownChildPolicy::Reject
    );
    assert_eq!(
        unknown_child_policy(Some(&path), Some(UnknownChildPolicy::AppendAfterKnown))
            .expect("policy"),
        UnknownChildPolicy::AppendAfterKnown
    );
    assert_eq!(
        unknown_child_policy(None, None).expect("policy"),
        UnknownChildPolicy::AppendAfterKnown
    );
}
