//! Milestone congratulation handler.

use tracing::info;

use presets::milestone::{count_author_issues, is_milestone, message};
use presets::{Issue, IssueTracker, LabelKeeperError};

/// Posts a congratulation on `issue` if it is a milestone issue for its
/// author. Returns the author's issue count and whether a comment was posted.
///
/// # Errors
///
/// [`presets::MilestoneError::AuthorIssuesUnavailable`] (wrapped) if the
/// author's issues cannot be listed; the comment call's error if posting
/// fails.
pub async fn congratulate_milestone(
    tracker: &dyn IssueTracker,
    issue: &Issue,
) -> Result<(u64, bool), LabelKeeperError> {
    let count = count_author_issues(tracker, &issue.author).await?;
    if !is_milestone(count) {
        return Ok((count, false));
    }

    tracker.post_comment(issue.number, &message(count)).await?;
    info!(issue = %issue.number, author = %issue.author, count, "Posted milestone congratulation");
    Ok((count, true))
}
