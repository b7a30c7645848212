//! Tests for action parsing.

use rstest::rstest;

use crate::OrgwatchConfig;
use crate::config::OperationMode;
use crate::github::error::WatchError;

#[rstest]
fn operation_mode_defaults_to_list() {
    let config = OrgwatchConfig::default();

    assert_eq!(
        config.operation_mode().ok(),
        Some(OperationMode::List),
        "should list when no action is set"
    );
}

#[rstest]
#[case("list", OperationMode::List)]
#[case("subscribed", OperationMode::Subscribed)]
#[case("subscribe", OperationMode::Subscribe)]
#[case("unsubscribe", OperationMode::Unsubscribe)]
#[case("first-commit", OperationMode::FirstCommit)]
fn operation_mode_parses_each_action(#[case] action: &str, #[case] expected: OperationMode) {
    let config = OrgwatchConfig {
        action: Some(action.to_owned()),
        ..Default::default()
    };

    let mode = config.operation_mode().expect("action should parse");
    assert_eq!(mode, expected);
    assert_eq!(mode.as_str(), action, "spelling should round-trip");
}

#[rstest]
#[case("LIST")]
#[case("watch")]
#[case("")]
fn operation_mode_rejects_unknown_actions(#[case] action: &str) {
    let config = OrgwatchConfig {
        action: Some(action.to_owned()),
        ..Default::default()
    };

    let result = config.operation_mode();
    assert!(
        matches!(result, Err(WatchError::Configuration { .. })),
        "expected Configuration error, got {result:?}"
    );
}
