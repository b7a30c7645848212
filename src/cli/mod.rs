//! CLI operation handlers.
//!
//! This module contains the implementations for each `action`:
//! - [`listing`]: Print organisation repositories or current subscriptions
//! - [`subscription`]: Subscribe to or unsubscribe from repositories
//! - [`first_commit`]: Print the oldest commit of a repository
//!
//! Output formatting utilities are in [`output`] and stdin parsing in
//! [`names`].

use std::io::{self, BufRead, Write};

use orgwatch::diagnostics::{ConsoleSink, JsonlSink};
use orgwatch::github::ApiBase;
use orgwatch::{
    DiagnosticSink, OctocrabGateway, OperationMode, OrgwatchConfig, PersonalAccessToken,
    RepositoryGateway, WatchError,
};

pub mod first_commit;
pub mod listing;
pub mod names;
pub mod output;
pub mod subscription;

#[cfg(test)]
pub mod test_utils;

/// Everything a handler needs besides its input and output streams.
pub struct Session<'run, G>
where
    G: RepositoryGateway,
{
    /// Gateway used for every request.
    pub gateway: &'run G,
    /// Diagnostic channel.
    pub sink: &'run dyn DiagnosticSink,
    /// Loaded configuration.
    pub config: &'run OrgwatchConfig,
}

/// Runs the configured action against GitHub using stdin and stdout.
///
/// # Errors
///
/// Returns any configuration, I/O, or GitHub failure.
pub async fn run(config: &OrgwatchConfig) -> Result<(), WatchError> {
    let sink = diagnostic_sink(config);
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    run_with_gateway_builder(
        config,
        OctocrabGateway::for_token,
        stdin,
        &mut stdout,
        sink.as_ref(),
    )
    .await
}

/// Runs the configured action using a custom gateway builder.
///
/// This function is exposed for testing with stub gateways.
pub async fn run_with_gateway_builder<G, F, R, W>(
    config: &OrgwatchConfig,
    build_gateway: F,
    input: R,
    output: &mut W,
    sink: &dyn DiagnosticSink,
) -> Result<(), WatchError>
where
    G: RepositoryGateway,
    F: FnOnce(&PersonalAccessToken, &ApiBase) -> Result<G, WatchError>,
    R: BufRead,
    W: Write,
{
    let mode = config.operation_mode()?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let api_base = config.api_base()?;
    let gateway = build_gateway(&token, &api_base)?;
    let session = Session {
        gateway: &gateway,
        sink,
        config,
    };

    match mode {
        OperationMode::FirstCommit => first_commit::run(&session, output).await,
        OperationMode::List => listing::list(&session, &config.require_org()?, output).await,
        OperationMode::Subscribed => {
            listing::subscribed(&session, &config.require_org()?, output).await
        }
        OperationMode::Subscribe => {
            subscription::subscribe(&session, &config.require_org()?, input).await
        }
        OperationMode::Unsubscribe => {
            subscription::unsubscribe(&session, &config.require_org()?, input).await
        }
    }
}

fn diagnostic_sink(config: &OrgwatchConfig) -> Box<dyn DiagnosticSink> {
    if config.jsonl_diagnostics {
        Box::new(JsonlSink)
    } else {
        Box::new(ConsoleSink)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use orgwatch::diagnostics::RecordingSink;
    use orgwatch::github::models::test_support::{repository, search_page};
    use orgwatch::{OrgwatchConfig, WatchError};

    use super::run_with_gateway_builder;
    use super::test_utils::StubGateway;

    fn config(action: &str) -> OrgwatchConfig {
        OrgwatchConfig {
            token: Some("ghp_example".to_owned()),
            org: Some("acme".to_owned()),
            action: Some(action.to_owned()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builder_receives_token_and_public_api_base() {
        let gateway = StubGateway {
            org_repositories: vec![repository("acme", "widget")],
            ..StubGateway::default()
        };
        let sink = RecordingSink::default();
        let mut buffer = Vec::new();

        run_with_gateway_builder(
            &config("list"),
            move |token, api_base| {
                assert_eq!(token.value(), "ghp_example", "unexpected token");
                assert_eq!(api_base.as_str(), "https://api.github.com/");
                Ok(gateway)
            },
            Cursor::new(""),
            &mut buffer,
            &sink,
        )
        .await
        .expect("listing should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert_eq!(output, "widget\n");
    }

    #[tokio::test]
    async fn unknown_action_fails_before_building_gateway() {
        let sink = RecordingSink::default();
        let mut buffer = Vec::new();

        let result = run_with_gateway_builder(
            &config("watch"),
            |_token, _api_base| -> Result<StubGateway, WatchError> {
                panic!("gateway should not be built")
            },
            Cursor::new(""),
            &mut buffer,
            &sink,
        )
        .await;

        assert!(
            matches!(result, Err(WatchError::Configuration { .. })),
            "expected Configuration error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn missing_org_is_reported() {
        let _guard = env_lock::lock_env([("GITHUB_ORG", None::<&str>)]);
        let config = OrgwatchConfig {
            org: None,
            ..config("list")
        };
        let sink = RecordingSink::default();
        let mut buffer = Vec::new();

        let result = run_with_gateway_builder(
            &config,
            |_token, _api_base| Ok(StubGateway::default()),
            Cursor::new(""),
            &mut buffer,
            &sink,
        )
        .await;

        assert_eq!(result, Err(WatchError::MissingOrganisation));
    }

    #[tokio::test]
    async fn subscribe_from_topic_search_runs_batch() {
        let gateway = StubGateway {
            search: search_page("acme", 2, 2),
            ..StubGateway::default()
        };
        let config = OrgwatchConfig {
            topic: Some("ops".to_owned()),
            ..config("subscribe")
        };
        let calls = Arc::clone(&gateway.calls);
        let sink = RecordingSink::default();
        let mut buffer = Vec::new();

        run_with_gateway_builder(
            &config,
            move |_token, _api_base| Ok(gateway),
            Cursor::new(""),
            &mut buffer,
            &sink,
        )
        .await
        .expect("subscribe should succeed");

        assert_eq!(
            *calls.lock().expect("calls mutex should be available"),
            vec![
                "search user:acme topic:ops",
                "subscribe acme/repo-1 true",
                "subscribe acme/repo-2 true",
            ]
        );
        assert!(buffer.is_empty(), "subscribe should not write results");
    }
}
