//! Collaborator (port) traits.
//!
//! The engines in this crate decide *what* to change; these traits are how
//! handlers ask the platform to change it. Each method is a plain request
//! with no hidden state so tests can substitute in-memory doubles.
//!
//! Implementations own transport, authentication, retries and timeouts.

use async_trait::async_trait;

use crate::errors::PortError;
use crate::model::{IssueSummary, Release, RemoteLabel, RemotePullRequest};
use crate::reconcile::LabelUpdate;
use crate::{DateRange, IssueNumber, PullRequestFilter, UserLogin};

/// Repository label management.
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// Every label currently defined on the repository.
    async fn fetch_remote_labels(&self) -> Result<Vec<RemoteLabel>, PortError>;

    async fn create_label(&self, name: &str, description: &str, color: &str)
        -> Result<(), PortError>;

    /// Renames `update.old_name` and sets its description and colour.
    async fn update_label(&self, update: &LabelUpdate) -> Result<(), PortError>;
}

/// Issue and pull-request conversation and labelling.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Issues opened by `author`, or `None` if the lookup did not succeed.
    async fn fetch_issues_by_author(&self, author: &UserLogin) -> Option<Vec<IssueSummary>>;

    async fn post_comment(&self, issue: IssueNumber, body: &str) -> Result<(), PortError>;

    async fn remove_label(&self, issue: IssueNumber, name: &str) -> Result<(), PortError>;

    /// Adds all of `names` in one request.
    async fn add_labels(&self, issue: IssueNumber, names: &[String]) -> Result<(), PortError>;
}

/// Release and merged pull-request access.
#[async_trait]
pub trait ReleaseStore: Send + Sync {
    async fn fetch_last_published_release(&self) -> Result<Option<Release>, PortError>;

    async fn fetch_pull_requests(
        &self,
        filter: PullRequestFilter,
        range: DateRange,
    ) -> Result<Vec<RemotePullRequest>, PortError>;

    /// Returns `false` if the body was not updated. Callers must check it.
    async fn update_release_body(&self, release: &Release, body: &str) -> bool;
}
