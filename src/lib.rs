//! Orgwatch library crate for discovering and watching an organisation's
//! GitHub repositories.
//!
//! The library wraps Octocrab to list an organisation's repositories (in
//! full or by topic), filter them, and subscribe to or unsubscribe from them
//! in bulk. Progress and rate limit diagnostics go to a [`DiagnosticSink`]
//! so results can be piped from stdout.

pub mod config;
pub mod diagnostics;
pub mod github;

pub use config::{OperationMode, OrgwatchConfig};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink};
pub use github::{
    OctocrabGateway, OrganisationName, PersonalAccessToken, RepositoryFinder, RepositoryGateway,
    RepositoryRecord, SubscriptionManager, WatchError,
};
