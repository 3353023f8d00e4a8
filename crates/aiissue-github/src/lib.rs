//! GitHub side of the issue automation.
//! This crate parses the inbound comment event, talks to the GitHub REST API,
//! and renders the closing reference used to link a pull request to its issue.

pub mod closing_reference;
pub mod github_api_client;
pub mod github_transport_helpers;
pub mod github_types;
pub mod repo_ref;
pub mod trigger_event;

pub use closing_reference::{append_closing_reference, closing_reference, contains_closing_reference};
pub use github_api_client::{GithubApiClient, GithubApiClientConfig, GithubError};
pub use github_types::{
    CreateIssueRequest, GithubCreatedIssue, GithubIssueType, GithubLabel, GithubPullRequest,
    GithubUser,
};
pub use repo_ref::{RepoRef, RepoRefParseError};
pub use trigger_event::{
    comment_has_trigger, parse_trigger_event, read_trigger_event, EventError, TriggerEvent,
    TRIGGER_PHRASE,
};
