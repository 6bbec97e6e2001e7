//! Label handlers: repository label sync and pull-request relabelling.

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use presets::{
    reconcile, IssueNumber, IssueTracker, Label, LabelCatalog, LabelCreateFailed, LabelReplacement,
    LabelStore, LabelUpdate, PortError, ReconciliationPlan,
};

/// What a label sync pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Names of presets whose remote label was renamed/restyled.
    pub updated: Vec<String>,
    /// Updates the platform rejected, as `(old_name, error)`.
    pub update_failures: Vec<(String, PortError)>,
    /// Names of presets that were created.
    pub created: Vec<String>,
    pub create_failures: Vec<LabelCreateFailed>,
}

/// Fetches the repository's labels, reconciles them against `catalog`, and
/// requests the resulting updates and creations.
///
/// Only the initial fetch can fail the pass; individual update and create
/// failures are logged and reported without stopping their siblings.
pub async fn sync_labels(
    catalog: &LabelCatalog,
    store: &dyn LabelStore,
) -> Result<SyncReport, PortError> {
    let remote = store.fetch_remote_labels().await?;
    let ReconciliationPlan { updates, missing } = reconcile(&remote, catalog);
    info!(
        remote = remote.len(),
        updates = updates.len(),
        missing = missing.len(),
        "Reconciled repository labels"
    );

    let mut report = SyncReport::default();

    let results = join_all(
        updates
            .iter()
            .map(|u| async move { apply_update(store, u).await.map_err(|e| (u, e)) }),
    )
    .await;
    for (update, err) in results.into_iter().filter_map(Result::err) {
        warn!(label = update.old_name.as_str(), error = %err, "Label update failed");
        report.update_failures.push((update.old_name.clone(), err));
    }
    report.updated = updates
        .iter()
        .filter(|u| !report.update_failures.iter().any(|(n, _)| *n == u.old_name))
        .map(|u| u.new_name.clone())
        .collect();

    report.create_failures = generate_missing_labels(store, &missing).await;
    report.created = missing
        .iter()
        .filter(|l| !report.create_failures.iter().any(|f| f.name == l.name()))
        .map(|l| l.name().to_string())
        .collect();

    Ok(report)
}

/// Requests creation of every label in `missing`.
///
/// Each creation is issued independently; one failure never prevents the
/// others from being attempted. Failures are logged and returned.
pub async fn generate_missing_labels(
    store: &dyn LabelStore,
    missing: &[Label],
) -> Vec<LabelCreateFailed> {
    let attempts = missing.iter().map(|label| async move {
        store
            .create_label(label.name(), label.description(), label.color())
            .await
            .map_err(|cause| LabelCreateFailed {
                name: label.name().to_string(),
                cause,
            })
    });

    join_all(attempts)
        .await
        .into_iter()
        .filter_map(Result::err)
        .inspect(|failure| warn!(error = %failure, "Label creation failed"))
        .collect()
}

/// Requests one label update.
pub async fn apply_update(store: &dyn LabelStore, update: &LabelUpdate) -> Result<(), PortError> {
    debug!(
        old = update.old_name.as_str(),
        new = update.new_name.as_str(),
        "Updating label"
    );
    store.update_label(update).await
}

/// Removes `replacement.remove` one at a time, then adds `replacement.add`
/// in a single request.
///
/// A failed removal (typically a label already gone) is logged and skipped;
/// a failed add is returned.
pub async fn replace_labels(
    tracker: &dyn IssueTracker,
    issue: IssueNumber,
    replacement: &LabelReplacement,
) -> Result<(), PortError> {
    for name in &replacement.remove {
        if let Err(err) = tracker.remove_label(issue, name).await {
            warn!(%issue, label = name.as_str(), error = %err, "Label removal failed");
        }
    }

    if replacement.add.is_empty() {
        return Ok(());
    }
    tracker.add_labels(issue, &replacement.add).await
}
