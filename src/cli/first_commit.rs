//! Oldest commit lookup for a single repository.

use std::io::Write;

use orgwatch::{RepositoryFinder, RepositoryGateway, WatchError};

use super::Session;
use super::output::write_commit;

/// Prints the oldest commit of the configured repository, or nothing when
/// the repository has none.
///
/// # Errors
///
/// Returns a configuration error when no repository is set, or any I/O or
/// GitHub failure.
pub async fn run<G, W>(session: &Session<'_, G>, writer: &mut W) -> Result<(), WatchError>
where
    G: RepositoryGateway,
    W: Write,
{
    let repo = session.config.require_repo()?;
    let finder = RepositoryFinder::new(session.gateway, session.sink);

    match finder.first_commit(repo).await? {
        Some(commit) => write_commit(writer, &commit),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use orgwatch::diagnostics::NoopSink;
    use orgwatch::github::CommitRecord;
    use orgwatch::{OrgwatchConfig, WatchError};

    use super::run;
    use crate::cli::Session;
    use crate::cli::test_utils::StubGateway;

    fn config(repo: Option<&str>) -> OrgwatchConfig {
        OrgwatchConfig {
            repo: repo.map(str::to_owned),
            ..OrgwatchConfig::default()
        }
    }

    #[tokio::test]
    async fn prints_oldest_commit() {
        let gateway = StubGateway {
            commits: vec![CommitRecord {
                sha: "abc123".to_owned(),
                message: Some("Initial commit".to_owned()),
                author_date: Some("2015-03-01T12:00:00.000Z".to_owned()),
                html_url: None,
            }],
            ..StubGateway::default()
        };
        let config = config(Some("acme/widget"));
        let session = Session {
            gateway: &gateway,
            sink: &NoopSink,
            config: &config,
        };
        let mut buffer = Vec::new();

        run(&session, &mut buffer)
            .await
            .expect("lookup should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert_eq!(output, "abc123 2015-03-01T12:00:00.000Z Initial commit\n");
        assert_eq!(
            gateway.calls(),
            vec!["commits repo:acme/widget merge:false per_page=1"]
        );
    }

    #[tokio::test]
    async fn empty_repository_prints_nothing() {
        let gateway = StubGateway::default();
        let config = config(Some("acme/empty"));
        let session = Session {
            gateway: &gateway,
            sink: &NoopSink,
            config: &config,
        };
        let mut buffer = Vec::new();

        run(&session, &mut buffer)
            .await
            .expect("lookup should succeed");

        assert!(buffer.is_empty());
    }

    #[tokio::test]
    async fn missing_repo_is_a_configuration_error() {
        let gateway = StubGateway::default();
        let config = config(None);
        let session = Session {
            gateway: &gateway,
            sink: &NoopSink,
            config: &config,
        };
        let mut buffer = Vec::new();

        let result = run(&session, &mut buffer).await;

        assert!(matches!(result, Err(WatchError::Configuration { .. })));
        assert!(gateway.calls().is_empty());
    }
}
