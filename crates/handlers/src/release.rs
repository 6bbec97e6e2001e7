//! Release changelog handler.

use tracing::{debug, info, warn};

use presets::{
    ChangelogDrafter, DateRange, LabelCatalog, PortError, PullRequest, PullRequestFilter, Release,
    ReleaseStore,
};

/// Redrafts the changelog of `current` and asks the store to save it.
///
/// A published release is left alone and reported as success without any
/// collaborator call. Otherwise returns the store's "body updated" flag.
pub async fn update_release_changelog(
    catalog: &LabelCatalog,
    drafter: &ChangelogDrafter,
    store: &dyn ReleaseStore,
    current: &Release,
) -> Result<bool, PortError> {
    if !current.draft {
        debug!(release = %current.id, "Skipping published release");
        return Ok(true);
    }

    let last = store.fetch_last_published_release().await?;
    let since = last.as_ref().and_then(|r| r.published_at);
    let merged: Vec<PullRequest> = store
        .fetch_pull_requests(PullRequestFilter::Merged, DateRange::since(since))
        .await?
        .iter()
        .map(|remote| PullRequest::from_remote(remote, catalog))
        .collect();

    let body = drafter.draft_release(current, last.as_ref(), &merged);
    let updated = store.update_release_body(current, &body).await;
    if updated {
        info!(release = %current.id, pull_requests = merged.len(), "Release changelog updated");
    } else {
        warn!(release = %current.id, "Release body was not updated");
    }
    Ok(updated)
}
