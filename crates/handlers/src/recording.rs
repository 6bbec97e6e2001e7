//! An in-memory platform that serves a fixed snapshot and records every
//! mutation requested of it instead of performing it.
//!
//! Backs the CLI's `replay` command and the handler tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use presets::{
    DateRange, IssueNumber, IssueSummary, IssueTracker, LabelStore, LabelUpdate, PortError,
    PullRequestFilter, Release, ReleaseId, ReleaseStore, RemoteLabel, RemotePullRequest, UserLogin,
};

/// Platform state served by a [`RecordingPlatform`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSnapshot {
    pub labels: Vec<RemoteLabel>,
    /// `None` makes author-issue lookups fail.
    pub author_issues: Option<Vec<IssueSummary>>,
    pub last_published_release: Option<Release>,
    pub pull_requests: Vec<RemotePullRequest>,
    /// Label names whose creation is rejected.
    pub failing_labels: Vec<String>,
    /// Label names (the old name) whose update is rejected.
    pub failing_updates: Vec<String>,
    /// Label names whose removal from an issue is rejected.
    pub failing_removals: Vec<String>,
    /// When set, release body updates report "not updated".
    pub reject_release_updates: bool,
}

/// A mutation requested of the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    CreateLabel {
        name: String,
        description: String,
        color: String,
    },
    UpdateLabel(LabelUpdate),
    PostComment {
        issue: IssueNumber,
        body: String,
    },
    RemoveLabel {
        issue: IssueNumber,
        name: String,
    },
    AddLabels {
        issue: IssueNumber,
        names: Vec<String>,
    },
    UpdateReleaseBody {
        release: ReleaseId,
        body: String,
    },
}

#[derive(Debug, Default)]
pub struct RecordingPlatform {
    snapshot: PlatformSnapshot,
    mutations: Mutex<Vec<Mutation>>,
}

impl RecordingPlatform {
    pub fn new(snapshot: PlatformSnapshot) -> Self {
        Self {
            snapshot,
            mutations: Mutex::new(Vec::new()),
        }
    }

    /// Mutations recorded so far, in request order.
    pub async fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().await.clone()
    }

    async fn record(&self, mutation: Mutation) {
        self.mutations.lock().await.push(mutation);
    }
}

#[async_trait]
impl LabelStore for RecordingPlatform {
    async fn fetch_remote_labels(&self) -> Result<Vec<RemoteLabel>, PortError> {
        Ok(self.snapshot.labels.clone())
    }

    async fn create_label(
        &self,
        name: &str,
        description: &str,
        color: &str,
    ) -> Result<(), PortError> {
        if self.snapshot.failing_labels.iter().any(|n| n == name) {
            return Err(PortError::request("create_label", "rejected by snapshot"));
        }
        self.record(Mutation::CreateLabel {
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
        })
        .await;
        Ok(())
    }

    async fn update_label(&self, update: &LabelUpdate) -> Result<(), PortError> {
        if self.snapshot.failing_updates.contains(&update.old_name) {
            return Err(PortError::request("update_label", "rejected by snapshot"));
        }
        self.record(Mutation::UpdateLabel(update.clone())).await;
        Ok(())
    }
}

#[async_trait]
impl IssueTracker for RecordingPlatform {
    async fn fetch_issues_by_author(&self, _author: &UserLogin) -> Option<Vec<IssueSummary>> {
        self.snapshot.author_issues.clone()
    }

    async fn post_comment(&self, issue: IssueNumber, body: &str) -> Result<(), PortError> {
        self.record(Mutation::PostComment {
            issue,
            body: body.to_string(),
        })
        .await;
        Ok(())
    }

    async fn remove_label(&self, issue: IssueNumber, name: &str) -> Result<(), PortError> {
        if self.snapshot.failing_removals.iter().any(|n| n == name) {
            return Err(PortError::request("remove_label", "rejected by snapshot"));
        }
        self.record(Mutation::RemoveLabel {
            issue,
            name: name.to_string(),
        })
        .await;
        Ok(())
    }

    async fn add_labels(&self, issue: IssueNumber, names: &[String]) -> Result<(), PortError> {
        self.record(Mutation::AddLabels {
            issue,
            names: names.to_vec(),
        })
        .await;
        Ok(())
    }
}

#[async_trait]
impl ReleaseStore for RecordingPlatform {
    async fn fetch_last_published_release(&self) -> Result<Option<Release>, PortError> {
        Ok(self.snapshot.last_published_release.clone())
    }

    async fn fetch_pull_requests(
        &self,
        filter: PullRequestFilter,
        range: DateRange,
    ) -> Result<Vec<RemotePullRequest>, PortError> {
        Ok(self
            .snapshot
            .pull_requests
            .iter()
            .filter(|pr| match filter {
                PullRequestFilter::Merged => pr.merged_at.is_some_and(|at| range.contains(at)),
                PullRequestFilter::Draft => pr.draft,
            })
            .cloned()
            .collect())
    }

    async fn update_release_body(&self, release: &Release, body: &str) -> bool {
        if self.snapshot.reject_release_updates {
            return false;
        }
        self.record(Mutation::UpdateReleaseBody {
            release: release.id,
            body: body.to_string(),
        })
        .await;
        true
    }
}
