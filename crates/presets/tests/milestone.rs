use async_trait::async_trait;
use presets::milestone::{count_author_issues, is_milestone, message};
use presets::{IssueNumber, IssueSummary, IssueTracker, MilestoneError, PortError, UserLogin};

struct FixedTracker {
    issues: Option<usize>,
}

#[async_trait]
impl IssueTracker for FixedTracker {
    async fn fetch_issues_by_author(&self, _author: &UserLogin) -> Option<Vec<IssueSummary>> {
        self.issues.map(|n| {
            (1..=n as u64)
                .map(|i| IssueSummary {
                    number: IssueNumber::new(i),
                    title: format!("Issue {i}"),
                })
                .collect()
        })
    }

    async fn post_comment(&self, _issue: IssueNumber, _body: &str) -> Result<(), PortError> {
        Ok(())
    }

    async fn remove_label(&self, _issue: IssueNumber, _name: &str) -> Result<(), PortError> {
        Ok(())
    }

    async fn add_labels(&self, _issue: IssueNumber, _names: &[String]) -> Result<(), PortError> {
        Ok(())
    }
}

#[tokio::test]
async fn counts_author_issues() {
    let tracker = FixedTracker { issues: Some(25) };
    let login = UserLogin::new("octocat").unwrap();

    let count = count_author_issues(&tracker, &login).await.unwrap();

    assert_eq!(count, 25);
    assert!(is_milestone(count));
    assert!(message(count).ends_with("25th issue"));
}

#[tokio::test]
async fn missing_author_issues_is_an_error() {
    let tracker = FixedTracker { issues: None };
    let login = UserLogin::new("ghost").unwrap();

    let err = count_author_issues(&tracker, &login).await.unwrap_err();

    assert_eq!(err, MilestoneError::AuthorIssuesUnavailable { login });
}
