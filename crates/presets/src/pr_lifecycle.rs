//! Lifecycle labels on pull requests.
//!
//! When a pull request changes state its `PR.*` labels are swapped for the
//! one label matching the new state.

use serde::{Deserialize, Serialize};

use crate::catalog::{CollectionKind, LabelAction, LabelCatalog};
use crate::model::RemoteLabel;

/// Pull-request state transitions that change lifecycle labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrLifecycle {
    Opened,
    ReadyForReview,
    ConvertedToDraft,
}

/// Which labels to remove and add on one issue or pull request.
///
/// Removals are requested one at a time, all before the single batched add.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelReplacement {
    pub remove: Vec<String>,
    pub add: Vec<String>,
}

/// Names of the preset labels a pull request should carry after `lifecycle`.
pub fn pr_label_names(catalog: &LabelCatalog, lifecycle: PrLifecycle) -> Vec<String> {
    let action = match lifecycle {
        PrLifecycle::Opened | PrLifecycle::ConvertedToDraft => LabelAction::OnGoing,
        PrLifecycle::ReadyForReview => LabelAction::ToReview,
    };
    catalog
        .get(CollectionKind::PullRequest, action)
        .map(|l| l.name().to_string())
        .into_iter()
        .collect()
}

/// Names of `labels` that belong to `kind`, recognised by the
/// `"<prefix>."` marker in their name.
pub fn collection_label_names(kind: CollectionKind, labels: &[RemoteLabel]) -> Vec<String> {
    let marker = format!("{}.", kind.prefix());
    labels
        .iter()
        .filter(|l| l.name.contains(&marker))
        .map(|l| l.name.clone())
        .collect()
}

/// Plans the lifecycle label swap for a pull request currently carrying
/// `current`.
pub fn plan_lifecycle_labels(
    catalog: &LabelCatalog,
    lifecycle: PrLifecycle,
    current: &[RemoteLabel],
) -> LabelReplacement {
    LabelReplacement {
        remove: collection_label_names(CollectionKind::PullRequest, current),
        add: pr_label_names(catalog, lifecycle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_for_review_selects_to_review() {
        let catalog = LabelCatalog::preset().unwrap();
        assert_eq!(
            pr_label_names(&catalog, PrLifecycle::ReadyForReview),
            vec!["👀 PR.ToReview".to_string()]
        );
    }

    #[test]
    fn test_draft_and_opened_select_ongoing() {
        let catalog = LabelCatalog::preset().unwrap();
        let expected = vec!["🚧 PR.OnGoing".to_string()];
        assert_eq!(pr_label_names(&catalog, PrLifecycle::Opened), expected);
        assert_eq!(
            pr_label_names(&catalog, PrLifecycle::ConvertedToDraft),
            expected
        );
    }

    #[test]
    fn test_only_lifecycle_labels_are_removed() {
        let catalog = LabelCatalog::preset().unwrap();
        let current = vec![
            RemoteLabel::new("🚧 PR.OnGoing", "", ""),
            RemoteLabel::new("🐛 Issue.Bug", "", ""),
            RemoteLabel::new("help wanted", "", ""),
        ];

        let plan = plan_lifecycle_labels(&catalog, PrLifecycle::ReadyForReview, &current);

        assert_eq!(plan.remove, vec!["🚧 PR.OnGoing".to_string()]);
        assert_eq!(plan.add, vec!["👀 PR.ToReview".to_string()]);
    }
}
