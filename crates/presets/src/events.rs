//! Mapping inbound webhook events to the work they trigger.

use serde::{Deserialize, Serialize};

use crate::model::{Release, RemoteIssue, RemotePullRequest};
use crate::pr_lifecycle::PrLifecycle;

/// One unit of work triggered by an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Swap the pull request's lifecycle labels.
    ReplacePrLabels(PrLifecycle),
    /// Reconcile repository labels with the preset catalog.
    SyncLabels,
    /// Congratulate the issue author if the issue count is a milestone.
    CongratulateMilestone,
    /// Redraft the changelog of the draft release.
    DraftChangelog,
}

/// Tasks for webhook `event` with optional `action`, in execution order.
///
/// Unknown events yield no tasks.
pub fn classify(event: &str, action: Option<&str>) -> Vec<Task> {
    let mut tasks = Vec::new();

    match (event, action) {
        ("pull_request", Some("opened" | "reopened" | "ready_for_review")) => {
            tasks.push(Task::ReplacePrLabels(PrLifecycle::ReadyForReview));
        }
        ("pull_request", Some("converted_to_draft")) => {
            tasks.push(Task::ReplacePrLabels(PrLifecycle::ConvertedToDraft));
        }
        _ => {}
    }

    if matches!(event, "issues" | "pull_request" | "label") {
        tasks.push(Task::SyncLabels);
    }

    if event == "issues" && matches!(action, Some("opened" | "edited")) {
        tasks.push(Task::CongratulateMilestone);
    }

    if event == "release" && matches!(action, Some("created" | "edited")) {
        tasks.push(Task::DraftChangelog);
    }

    tasks
}

/// The parts of a webhook payload the handlers read.
///
/// Deserializes directly from the platform's webhook JSON; unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub issue: Option<RemoteIssue>,
    #[serde(default)]
    pub pull_request: Option<RemotePullRequest>,
    #[serde(default)]
    pub release: Option<Release>,
}

/// A webhook delivery: the event name (from the delivery header) and its
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub name: String,
    pub payload: EventPayload,
}

impl InboundEvent {
    pub fn new(name: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// See [`classify`].
    pub fn tasks(&self) -> Vec<Task> {
        classify(&self.name, self.payload.action.as_deref())
    }
}
