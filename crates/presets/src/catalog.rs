//! The preset label catalog.
//!
//! A [`LabelCatalog`] is an ordered list of [`LabelCollection`]s. Catalog
//! order (collections first, then labels within each collection) is part of
//! the observable contract of [`crate::reconcile`]: it decides which preset
//! claims a remote label when several could.
//!
//! The catalog is built once at startup (normally via
//! [`LabelCatalog::preset`]) and shared read-only, typically as
//! `Arc<LabelCatalog>`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;
use crate::label::Label;

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// A named grouping of preset labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    /// Pull-request lifecycle labels (`PR.*`).
    #[serde(rename = "PR")]
    PullRequest,
    /// Issue category labels (`Issue.*`). Also used for changelog headers.
    #[serde(rename = "Issue")]
    Issue,
}

impl CollectionKind {
    /// The prefix used in label names, e.g. `"PR"` in `"👀 PR.ToReview"`.
    pub fn prefix(self) -> &'static str {
        match self {
            CollectionKind::PullRequest => "PR",
            CollectionKind::Issue => "Issue",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// The semantic purpose of a preset label.
///
/// Unique per collection: a collection holds at most one label per action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelAction {
    ToReview,
    ToMerge,
    OnGoing,
    #[serde(rename = "OnHold")]
    Paused,
    Bug,
    WontFix,
    Feature,
    #[serde(rename = "Doc")]
    Documentation,
    Enhancement,
}

impl LabelAction {
    /// The stable string tag for this action.
    pub fn as_str(self) -> &'static str {
        match self {
            LabelAction::ToReview => "ToReview",
            LabelAction::ToMerge => "ToMerge",
            LabelAction::OnGoing => "OnGoing",
            LabelAction::Paused => "OnHold",
            LabelAction::Bug => "Bug",
            LabelAction::WontFix => "WontFix",
            LabelAction::Feature => "Feature",
            LabelAction::Documentation => "Doc",
            LabelAction::Enhancement => "Enhancement",
        }
    }
}

impl std::fmt::Display for LabelAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// The labels of one [`CollectionKind`], in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCollection {
    kind: CollectionKind,
    labels: Vec<Label>,
}

impl LabelCollection {
    /// Creates a collection.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::CollectionMismatch`] if a label was declared for a
    ///   different collection.
    /// - [`CatalogError::DuplicateAction`] if two labels share an action.
    pub fn new(kind: CollectionKind, labels: Vec<Label>) -> Result<Self, CatalogError> {
        let mut seen = Vec::with_capacity(labels.len());
        for label in &labels {
            if label.collection() != kind {
                return Err(CatalogError::CollectionMismatch {
                    name: label.name().to_string(),
                    expected: label.collection(),
                    found: kind,
                });
            }
            if seen.contains(&label.action()) {
                return Err(CatalogError::DuplicateAction {
                    collection: kind,
                    action: label.action(),
                });
            }
            seen.push(label.action());
        }
        Ok(Self { kind, labels })
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Position of a label inside the catalog: (collection index, label index).
type Slot = (usize, usize);

/// The complete, validated set of preset labels.
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    collections: Vec<LabelCollection>,
    by_action: HashMap<(CollectionKind, LabelAction), Slot>,
    by_name: HashMap<String, Slot>,
}

impl LabelCatalog {
    /// Builds a catalog from collections in the given order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateName`] if two labels share a name.
    /// - [`CatalogError::DuplicateAction`] if the same collection kind is
    ///   given twice with overlapping actions.
    pub fn new(collections: Vec<LabelCollection>) -> Result<Self, CatalogError> {
        let mut by_action = HashMap::new();
        let mut by_name = HashMap::new();

        for (ci, collection) in collections.iter().enumerate() {
            for (li, label) in collection.labels().iter().enumerate() {
                let key = (collection.kind(), label.action());
                if by_action.insert(key, (ci, li)).is_some() {
                    return Err(CatalogError::DuplicateAction {
                        collection: key.0,
                        action: key.1,
                    });
                }
                if by_name.insert(label.name().to_string(), (ci, li)).is_some() {
                    return Err(CatalogError::DuplicateName {
                        name: label.name().to_string(),
                    });
                }
            }
        }

        Ok(Self {
            collections,
            by_action,
            by_name,
        })
    }

    /// The compiled-in preset catalog: the `PR` lifecycle collection followed
    /// by the `Issue` category collection.
    pub fn preset() -> Result<Self, CatalogError> {
        use CollectionKind::{Issue, PullRequest};
        use LabelAction::*;

        let pr = LabelCollection::new(
            PullRequest,
            vec![
                Label::new(
                    PullRequest,
                    ToReview,
                    "👀 PR.ToReview",
                    "Ready for review",
                    "FBCA04",
                    ["toreview", "to review", "needs review"],
                )?,
                Label::new(
                    PullRequest,
                    ToMerge,
                    "✅ PR.ToMerge",
                    "Approved and ready to merge",
                    "0E8A16",
                    ["tomerge", "to merge", "ready to merge"],
                )?,
                Label::new(
                    PullRequest,
                    OnGoing,
                    "🚧 PR.OnGoing",
                    "Work in progress",
                    "1D76DB",
                    ["ongoing", "wip", "in progress"],
                )?,
                Label::new(
                    PullRequest,
                    Paused,
                    "⏸️ PR.OnHold",
                    "Paused until further notice",
                    "C5DEF5",
                    ["onhold", "on hold", "paused"],
                )?,
            ],
        )?;

        let issue = LabelCollection::new(
            Issue,
            vec![
                Label::new(
                    Issue,
                    Bug,
                    "🐛 Issue.Bug",
                    "Something isn't working",
                    "D73A4A",
                    ["bug"],
                )?,
                Label::new(
                    Issue,
                    WontFix,
                    "🚫 Issue.WontFix",
                    "This will not be worked on",
                    "FFFFFF",
                    ["wontfix", "won't fix"],
                )?,
                Label::new(
                    Issue,
                    Feature,
                    "✨ Issue.Feature",
                    "New feature or request",
                    "A2EEEF",
                    ["feature"],
                )?,
                Label::new(
                    Issue,
                    Documentation,
                    "📝 Issue.Documentation",
                    "Improvements or additions to documentation",
                    "0075CA",
                    ["documentation", "docs"],
                )?,
                Label::new(
                    Issue,
                    Enhancement,
                    "⚡ Issue.Enhancement",
                    "Improvement to existing functionality",
                    "84B6EB",
                    ["enhancement"],
                )?,
            ],
        )?;

        Self::new(vec![pr, issue])
    }

    /// Collections in catalog order.
    pub fn collections(&self) -> &[LabelCollection] {
        &self.collections
    }

    /// Every preset label, in catalog order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.collections.iter().flat_map(|c| c.labels().iter())
    }

    /// Total number of preset labels.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Looks up the label for `action` in `kind`. O(1).
    pub fn get(&self, kind: CollectionKind, action: LabelAction) -> Option<&Label> {
        self.by_action
            .get(&(kind, action))
            .map(|&slot| self.at(slot))
    }

    /// Maps a remote label name to its preset by exact name.
    pub fn resolve(&self, name: &str) -> Option<&Label> {
        self.by_name.get(name).map(|&slot| self.at(slot))
    }

    fn at(&self, (ci, li): Slot) -> &Label {
        &self.collections[ci].labels()[li]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(kind: CollectionKind, action: LabelAction, name: &str) -> Label {
        Label::new(kind, action, name, "desc", "ffffff", ["alias"]).unwrap()
    }

    #[test]
    fn test_preset_catalog_is_valid() {
        let catalog = LabelCatalog::preset().unwrap();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.collections().len(), 2);
        assert_eq!(catalog.collections()[0].kind(), CollectionKind::PullRequest);
    }

    #[test]
    fn test_preset_names_carry_collection_prefix() {
        let catalog = LabelCatalog::preset().unwrap();
        for label in catalog.labels() {
            let marker = format!("{}.", label.collection().prefix());
            assert!(label.name().contains(&marker), "{}", label.name());
        }
    }

    #[test]
    fn test_get_by_collection_and_action() {
        let catalog = LabelCatalog::preset().unwrap();
        let label = catalog
            .get(CollectionKind::PullRequest, LabelAction::ToReview)
            .unwrap();
        assert_eq!(label.name(), "👀 PR.ToReview");
        assert!(catalog
            .get(CollectionKind::Issue, LabelAction::ToReview)
            .is_none());
    }

    #[test]
    fn test_resolve_is_exact_name() {
        let catalog = LabelCatalog::preset().unwrap();
        assert!(catalog.resolve("🐛 Issue.Bug").is_some());
        assert!(catalog.resolve("🐛 issue.bug").is_none());
    }

    #[test]
    fn test_duplicate_action_in_collection_rejected() {
        let err = LabelCollection::new(
            CollectionKind::Issue,
            vec![
                label(CollectionKind::Issue, LabelAction::Bug, "a"),
                label(CollectionKind::Issue, LabelAction::Bug, "b"),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateAction { .. }));
    }

    #[test]
    fn test_duplicate_name_across_collections_rejected() {
        let pr = LabelCollection::new(
            CollectionKind::PullRequest,
            vec![label(CollectionKind::PullRequest, LabelAction::ToReview, "same")],
        )
        .unwrap();
        let issue = LabelCollection::new(
            CollectionKind::Issue,
            vec![label(CollectionKind::Issue, LabelAction::Bug, "same")],
        )
        .unwrap();
        let err = LabelCatalog::new(vec![pr, issue]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName { name: "same".into() });
    }

    #[test]
    fn test_label_in_wrong_collection_rejected() {
        let err = LabelCollection::new(
            CollectionKind::Issue,
            vec![label(CollectionKind::PullRequest, LabelAction::ToReview, "x")],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::CollectionMismatch { .. }));
    }

    #[test]
    fn test_action_tags_round_trip_through_serde() {
        let json = serde_json::to_string(&LabelAction::Paused).unwrap();
        assert_eq!(json, "\"OnHold\"");
        assert_eq!(LabelAction::Documentation.as_str(), "Doc");
    }
}
