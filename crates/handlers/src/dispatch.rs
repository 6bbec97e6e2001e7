//! Event dispatch: the [`Bot`] runs every task an inbound event triggers.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};

use presets::{
    plan_lifecycle_labels, ChangelogDrafter, ChangelogSettings, Issue, IssueTracker, InboundEvent,
    LabelCatalog, LabelKeeperError, LabelReplacement, LabelStore, PassId, ReleaseStore, Task,
};

use crate::labels::{replace_labels, sync_labels, SyncReport};
use crate::milestone::congratulate_milestone;
use crate::release::update_release_changelog;

/// The result of one successfully run [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    LabelsSynced(SyncReport),
    PullRequestRelabelled(LabelReplacement),
    MilestoneChecked { count: u64, congratulated: bool },
    ChangelogDrafted { updated: bool },
    /// The payload lacked the object the task acts on.
    Skipped { reason: String },
}

/// Everything a handled event produced, one entry per task in order.
#[derive(Debug)]
pub struct EventReport {
    pub pass: PassId,
    pub results: Vec<(Task, Result<TaskOutcome, LabelKeeperError>)>,
}

/// Runs tasks against injected collaborators.
///
/// Holds no per-event state; one instance can serve concurrent events.
pub struct Bot {
    catalog: Arc<LabelCatalog>,
    drafter: ChangelogDrafter,
    labels: Arc<dyn LabelStore>,
    issues: Arc<dyn IssueTracker>,
    releases: Arc<dyn ReleaseStore>,
}

impl Bot {
    pub fn new(
        catalog: Arc<LabelCatalog>,
        labels: Arc<dyn LabelStore>,
        issues: Arc<dyn IssueTracker>,
        releases: Arc<dyn ReleaseStore>,
    ) -> Self {
        Self {
            catalog,
            drafter: ChangelogDrafter::default(),
            labels,
            issues,
            releases,
        }
    }

    pub fn with_changelog_settings(mut self, settings: ChangelogSettings) -> Self {
        self.drafter = ChangelogDrafter::new(settings);
        self
    }

    /// Runs every task `event` triggers. A failing task does not stop the
    /// ones after it; each task's result is reported separately.
    pub async fn handle(&self, event: &InboundEvent) -> EventReport {
        let pass = PassId::new_random();
        let span = info_span!(
            "handle_event",
            %pass,
            event = event.name.as_str(),
            action = event.payload.action.as_deref().unwrap_or("")
        );

        async {
            let tasks = event.tasks();
            info!(tasks = tasks.len(), "Handling event");

            let mut results = Vec::with_capacity(tasks.len());
            for task in tasks {
                let result = self.run(task, event).await;
                if let Err(err) = &result {
                    warn!(?task, error = %err, "Task failed");
                }
                results.push((task, result));
            }
            EventReport { pass, results }
        }
        .instrument(span)
        .await
    }

    /// Runs a single task against `event`'s payload.
    pub async fn run(
        &self,
        task: Task,
        event: &InboundEvent,
    ) -> Result<TaskOutcome, LabelKeeperError> {
        let payload = &event.payload;
        match task {
            Task::SyncLabels => {
                let report = sync_labels(&self.catalog, self.labels.as_ref()).await?;
                Ok(TaskOutcome::LabelsSynced(report))
            }
            Task::ReplacePrLabels(lifecycle) => {
                let Some(pr) = &payload.pull_request else {
                    return Ok(skipped("payload has no pull request"));
                };
                let replacement = plan_lifecycle_labels(&self.catalog, lifecycle, &pr.labels);
                replace_labels(self.issues.as_ref(), pr.number, &replacement).await?;
                Ok(TaskOutcome::PullRequestRelabelled(replacement))
            }
            Task::CongratulateMilestone => {
                let Some(remote) = &payload.issue else {
                    return Ok(skipped("payload has no issue"));
                };
                let issue = Issue::from_remote(remote, &self.catalog);
                let (count, congratulated) =
                    congratulate_milestone(self.issues.as_ref(), &issue).await?;
                Ok(TaskOutcome::MilestoneChecked {
                    count,
                    congratulated,
                })
            }
            Task::DraftChangelog => {
                let Some(release) = &payload.release else {
                    return Ok(skipped("payload has no release"));
                };
                let updated = update_release_changelog(
                    &self.catalog,
                    &self.drafter,
                    self.releases.as_ref(),
                    release,
                )
                .await?;
                Ok(TaskOutcome::ChangelogDrafted { updated })
            }
        }
    }
}

fn skipped(reason: &str) -> TaskOutcome {
    TaskOutcome::Skipped {
        reason: reason.to_string(),
    }
}
