//! Core domain for LabelKeeper.
//!
//! LabelKeeper keeps a repository's labels in line with a fixed catalog of
//! preset labels and drafts grouped changelogs for draft releases. This crate
//! holds every domain concept and decision: the catalog, the reconciliation
//! and changelog engines, the milestone rule, and the collaborator traits
//! through which handlers talk to the platform.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It decides *what* mutations to request; the implementors of [`ports`]
//! decide *how* to carry them out.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `UserLogin`, `PassId`, ...) |
//! | [`types`] | Shared value types (`Timestamp`, `DateRange`, ...) |
//! | [`errors`] | Error taxonomy |
//! | [`label`], [`catalog`] | Preset labels and the catalog that groups them |
//! | [`model`] | Snapshots of remote labels, pull requests, releases, issues |
//! | [`reconcile`] | Label reconciliation engine |
//! | [`changelog`] | Changelog drafting engine |
//! | [`milestone`] | Milestone congratulation rule |
//! | [`pr_lifecycle`] | Lifecycle label selection for pull requests |
//! | [`events`] | Webhook event to task mapping |
//! | [`ports`] | Collaborator traits |

pub mod catalog;
pub mod changelog;
pub mod errors;
pub mod events;
pub mod identifiers;
pub mod label;
pub mod milestone;
pub mod model;
pub mod ports;
pub mod pr_lifecycle;
pub mod reconcile;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use catalog::{CollectionKind, LabelAction, LabelCatalog, LabelCollection};
pub use changelog::{draft_release, ChangelogDrafter, ChangelogSettings};
pub use errors::{CatalogError, LabelCreateFailed, LabelKeeperError, MilestoneError, PortError};
pub use events::{classify, EventPayload, InboundEvent, Task};
pub use identifiers::{IssueNumber, PassId, ReleaseId, UserLogin};
pub use label::Label;
pub use model::{
    Issue, IssueSummary, PullRequest, Release, RemoteIssue, RemoteLabel, RemotePullRequest,
    RemoteUser,
};
pub use ports::{IssueTracker, LabelStore, ReleaseStore};
pub use pr_lifecycle::{plan_lifecycle_labels, LabelReplacement, PrLifecycle};
pub use reconcile::{reconcile, LabelUpdate, ReconciliationPlan};
pub use types::{DateRange, PullRequestFilter, Timestamp};
