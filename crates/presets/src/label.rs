//! The preset [`Label`] definition.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::catalog::{CollectionKind, LabelAction};
use crate::errors::CatalogError;
use crate::model::RemoteLabel;

/// A preset label: the canonical state a repository label should converge to.
///
/// Immutable after construction. The `aliases` are lowercase substrings used
/// to recognise an existing remote label as this preset even when its name
/// has drifted (see [`crate::reconcile`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    name: String,
    description: String,
    color: String,
    collection: CollectionKind,
    action: LabelAction,
    aliases: Vec<String>,
    fingerprint: String,
}

impl Label {
    /// Creates a preset label.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyAliases`] if `aliases` yields nothing.
    /// - [`CatalogError::InvalidAlias`] if an alias is empty or not lowercase.
    pub fn new<A, S>(
        collection: CollectionKind,
        action: LabelAction,
        name: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
        aliases: A,
    ) -> Result<Self, CatalogError>
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let description = description.into();
        let color = color.into();
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();

        if aliases.is_empty() {
            return Err(CatalogError::EmptyAliases { name });
        }
        if let Some(bad) = aliases
            .iter()
            .find(|a| a.is_empty() || a.to_lowercase() != **a)
        {
            return Err(CatalogError::InvalidAlias {
                alias: bad.clone(),
                name,
            });
        }

        let fingerprint = fingerprint(&name, &description, &color);
        Ok(Self {
            name,
            description,
            color,
            collection,
            action,
            aliases,
            fingerprint,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Hex colour swatch without a leading `#` (e.g. `"D73A4A"`).
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn collection(&self) -> CollectionKind {
        self.collection
    }

    pub fn action(&self) -> LabelAction {
        self.action
    }

    /// Alias substrings in match-priority order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// SHA-256 over name, description and colour, hex-encoded.
    ///
    /// For equality checks and debugging only; matching never uses it.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Returns the first alias contained in `remote_name`, compared
    /// case-insensitively.
    pub fn matching_alias(&self, remote_name: &str) -> Option<&str> {
        let lowered = remote_name.to_lowercase();
        self.aliases
            .iter()
            .find(|alias| lowered.contains(alias.as_str()))
            .map(String::as_str)
    }

    /// Returns `true` if `remote` already carries this label's exact name,
    /// description and colour. No normalisation is applied.
    pub fn is_equivalent_to(&self, remote: &RemoteLabel) -> bool {
        self.name == remote.name
            && self.description == remote.description
            && self.color == remote.color
    }
}

fn fingerprint(name: &str, description: &str, color: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(description.as_bytes());
    hasher.update(color.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bug() -> Label {
        Label::new(
            CollectionKind::Issue,
            LabelAction::Bug,
            "🐛 Issue.Bug",
            "Something isn't working",
            "D73A4A",
            ["bug"],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty_alias_list() {
        let err = Label::new(
            CollectionKind::Issue,
            LabelAction::Bug,
            "bug",
            "",
            "fff",
            Vec::<String>::new(),
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::EmptyAliases { name: "bug".into() });
    }

    #[test]
    fn test_new_rejects_uppercase_alias() {
        let err = Label::new(
            CollectionKind::Issue,
            LabelAction::Bug,
            "bug",
            "",
            "fff",
            ["Bug"],
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAlias { alias, .. } if alias == "Bug"));
    }

    #[test]
    fn test_fingerprint_is_deterministic_and_field_sensitive() {
        let a = bug();
        let b = bug();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        let recoloured = Label::new(
            CollectionKind::Issue,
            LabelAction::Bug,
            "🐛 Issue.Bug",
            "Something isn't working",
            "000000",
            ["bug"],
        )
        .unwrap();
        assert_ne!(a.fingerprint(), recoloured.fingerprint());
    }

    #[test]
    fn test_matching_alias_is_case_insensitive() {
        assert_eq!(bug().matching_alias("Type: BUG"), Some("bug"));
        assert_eq!(bug().matching_alias("feature"), None);
    }

    #[test]
    fn test_equivalence_is_exact() {
        let label = bug();
        let mut remote = RemoteLabel::new("🐛 Issue.Bug", "Something isn't working", "D73A4A");
        assert!(label.is_equivalent_to(&remote));

        remote.color = "d73a4a".into();
        assert!(!label.is_equivalent_to(&remote));
    }
}
