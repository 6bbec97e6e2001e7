//! Snapshots of platform state.
//!
//! The `Remote*` types mirror what the platform's REST API returns and
//! deserialize directly from its JSON. [`PullRequest`] and [`Issue`] are the
//! domain views: their labels are resolved against a [`LabelCatalog`].
//!
//! All of these are ephemeral. They are rebuilt from each inbound event and
//! dropped once the pass that consumed them completes.

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{CollectionKind, LabelCatalog};
use crate::label::Label;
use crate::{IssueNumber, ReleaseId, Timestamp, UserLogin};

/// The platform sends `null` for an unset label description or release body.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// A label as currently observed on the repository.
///
/// Has no identity beyond its three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLabel {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub color: String,
}

impl RemoteLabel {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            color: color.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pull requests
// ---------------------------------------------------------------------------

/// A pull request as returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePullRequest {
    pub number: IssueNumber,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<RemoteLabel>,
    #[serde(default)]
    pub merged_at: Option<Timestamp>,
    #[serde(default)]
    pub draft: bool,
}

/// A pull request with its labels resolved against the preset catalog.
///
/// Remote labels that are not presets are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: IssueNumber,
    pub title: String,
    pub labels: Vec<Label>,
    pub merged_at: Option<Timestamp>,
    pub draft: bool,
}

impl PullRequest {
    pub fn from_remote(remote: &RemotePullRequest, catalog: &LabelCatalog) -> Self {
        Self {
            number: remote.number,
            title: remote.title.clone(),
            labels: resolve_labels(&remote.labels, catalog),
            merged_at: remote.merged_at,
            draft: remote.draft,
        }
    }

    /// The first label belonging to `category`, if any.
    pub fn category_label(&self, category: CollectionKind) -> Option<&Label> {
        self.labels.iter().find(|l| l.collection() == category)
    }
}

// ---------------------------------------------------------------------------
// Releases
// ---------------------------------------------------------------------------

/// A release. Only ever mutated by replacing its `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: ReleaseId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub published_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// The author of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub login: UserLogin,
}

/// An issue as returned by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssue {
    pub number: IssueNumber,
    pub title: String,
    #[serde(default)]
    pub labels: Vec<RemoteLabel>,
    #[serde(default)]
    pub comments: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    pub user: RemoteUser,
}

/// The minimal view of an issue returned by author-issue lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub number: IssueNumber,
    pub title: String,
}

/// Read-only snapshot of an issue, labels resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub number: IssueNumber,
    pub title: String,
    pub labels: Vec<Label>,
    pub comments_count: u64,
    pub body: String,
    pub author: UserLogin,
}

impl Issue {
    pub fn from_remote(remote: &RemoteIssue, catalog: &LabelCatalog) -> Self {
        Self {
            number: remote.number,
            title: remote.title.clone(),
            labels: resolve_labels(&remote.labels, catalog),
            comments_count: remote.comments,
            body: remote.body.clone(),
            author: remote.user.login.clone(),
        }
    }
}

fn resolve_labels(remote: &[RemoteLabel], catalog: &LabelCatalog) -> Vec<Label> {
    remote
        .iter()
        .filter_map(|l| catalog.resolve(&l.name))
        .cloned()
        .collect()
}
