//! Error types for the LabelKeeper domain.
//!
//! [`LabelKeeperError`] covers conditions that abort handling of one inbound
//! event. Per-item failures that must not abort their siblings (label
//! creation) are reported as [`LabelCreateFailed`] values instead of being
//! propagated.
//!
//! None of these errors is retried by the domain; retry and timeout policy
//! belong to the collaborator implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CollectionKind, LabelAction};
use crate::UserLogin;

// ---------------------------------------------------------------------------
// Catalog construction
// ---------------------------------------------------------------------------

/// A preset catalog definition violated one of its construction invariants.
///
/// Produced only while building a [`crate::LabelCatalog`]; a constructed
/// catalog is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two labels in one collection share an action tag.
    #[error("Duplicate action {action} in collection {collection}")]
    DuplicateAction {
        collection: CollectionKind,
        action: LabelAction,
    },

    /// Two labels anywhere in the catalog share a name.
    #[error("Duplicate label name '{name}'")]
    DuplicateName { name: String },

    /// A label was declared without any alias to match remote labels by.
    #[error("Label '{name}' has no aliases")]
    EmptyAliases { name: String },

    /// Aliases are compared against lowercased remote names and must
    /// themselves be lowercase and non-empty.
    #[error("Alias '{alias}' of label '{name}' must be non-empty lowercase")]
    InvalidAlias { name: String, alias: String },

    /// A label declared for one collection was added to another.
    #[error("Label '{name}' belongs to {expected}, not {found}")]
    CollectionMismatch {
        name: String,
        expected: CollectionKind,
        found: CollectionKind,
    },
}

// ---------------------------------------------------------------------------
// Collaborator failures
// ---------------------------------------------------------------------------

/// A collaborator (port) call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PortError {
    /// The request was issued but the platform rejected it or it failed in
    /// transport.
    #[error("{operation} failed: {message}")]
    Request { operation: String, message: String },
}

impl PortError {
    /// Shorthand for [`PortError::Request`].
    pub fn request(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// A single preset label could not be created.
///
/// Never aborts the batch it belongs to; handlers collect these and log each
/// one individually.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Failed to create label '{name}': {cause}")]
pub struct LabelCreateFailed {
    /// Name of the preset label whose creation failed.
    pub name: String,
    /// The collaborator failure.
    pub cause: PortError,
}

// ---------------------------------------------------------------------------
// Milestone
// ---------------------------------------------------------------------------

/// Failures of the milestone congratulation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MilestoneError {
    /// The author-issue lookup returned no result, so the issue count cannot
    /// be determined. Fatal for the invocation; not retried.
    #[error("Cannot retrieve issues authored by {login}")]
    AuthorIssuesUnavailable { login: UserLogin },
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

/// Errors that abort handling of one inbound event.
#[derive(Debug, Error)]
pub enum LabelKeeperError {
    /// The catalog definition is invalid. Raised at startup only.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A collaborator call whose result the handler depends on failed.
    #[error(transparent)]
    Port(#[from] PortError),

    /// See [`MilestoneError`].
    #[error(transparent)]
    Milestone(#[from] MilestoneError),

    /// The runtime configuration is invalid.
    ///
    /// Produced at load time; the bot never starts with an invalid config.
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
