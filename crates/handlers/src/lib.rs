//! LabelKeeper event handlers.
//!
//! Each handler fetches what it needs through the [`presets::ports`] traits,
//! hands the snapshot to the matching pure engine in [`presets`], and
//! requests the resulting mutations. [`Bot`] maps an inbound event to its
//! tasks and runs them.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Handlers sequence calls between the engines and
//! the collaborator traits. They contain no matching or rendering rules of
//! their own.
//!
//! ## Ordering guarantees
//!
//! - Label creations and label updates are each issued independently; one
//!   failure never prevents its siblings from being attempted.
//! - When relabelling, every removal is requested before the batched add.

pub mod dispatch;
pub mod labels;
pub mod milestone;
pub mod recording;
pub mod release;

pub use dispatch::{Bot, EventReport, TaskOutcome};
pub use labels::{generate_missing_labels, replace_labels, sync_labels, SyncReport};
pub use milestone::congratulate_milestone;
pub use recording::{Mutation, PlatformSnapshot, RecordingPlatform};
pub use release::update_release_changelog;
