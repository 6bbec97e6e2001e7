//! Congratulating authors on milestone issue counts.

use tracing::debug;

use crate::errors::MilestoneError;
use crate::ports::IssueTracker;
use crate::UserLogin;

/// Issue counts that earn a congratulation, ascending.
pub const MILESTONES: [u64; 5] = [1, 25, 50, 75, 100];

/// Returns `true` if `count` is one of [`MILESTONES`].
pub fn is_milestone(count: u64) -> bool {
    MILESTONES.contains(&count)
}

/// Only the first milestone is "st"; this is not a general ordinal formatter.
fn suffix(count: u64) -> &'static str {
    match count {
        1 => "st",
        _ => "th",
    }
}

/// The congratulation posted on an author's `count`th issue.
pub fn message(count: u64) -> String {
    format!("😁🎊👍 Nice work opening your {count}{} issue", suffix(count))
}

/// Counts the issues `author` has opened.
///
/// # Errors
///
/// [`MilestoneError::AuthorIssuesUnavailable`] if the lookup returns nothing.
pub async fn count_author_issues(
    tracker: &dyn IssueTracker,
    author: &UserLogin,
) -> Result<u64, MilestoneError> {
    let issues = tracker.fetch_issues_by_author(author).await.ok_or_else(|| {
        MilestoneError::AuthorIssuesUnavailable {
            login: author.clone(),
        }
    })?;
    debug!(author = %author, count = issues.len(), "Counted author issues");
    Ok(issues.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_milestone() {
        assert!(is_milestone(1));
        assert!(is_milestone(25));
        assert!(is_milestone(100));
        assert!(!is_milestone(0));
        assert!(!is_milestone(26));
        assert!(!is_milestone(101));
    }

    #[test]
    fn test_message_suffixes() {
        assert!(message(1).ends_with("1st issue"));
        assert!(message(25).ends_with("25th issue"));
        assert!(message(50).ends_with("50th issue"));
    }

    #[test]
    fn test_suffix_is_not_general_ordinal() {
        assert_eq!(suffix(21), "th");
        assert_eq!(suffix(2), "th");
    }
}
