//! Label reconciliation: preset catalog versus observed repository labels.
//!
//! [`reconcile`] decides which remote labels already stand for a preset, which
//! of those drifted from the canonical name/description/colour, and which
//! presets have no remote counterpart at all. It performs no I/O; the
//! resulting [`ReconciliationPlan`] is carried out by the handlers.
//!
//! ## Matching
//!
//! Matching is greedy and order-dependent. Presets are visited in catalog
//! order; for each preset its aliases are tried in order, and for each alias
//! the still-available remote labels are scanned in input order. The first
//! remote label whose lowercased name contains the alias is claimed by that
//! preset and becomes unavailable to every later preset. The complexity bound
//! is O(presets × aliases × remote).
//!
//! Unmatched remote labels are left alone; nothing is ever deleted.

use serde::Serialize;
use tracing::debug;

use crate::catalog::LabelCatalog;
use crate::label::Label;
use crate::model::RemoteLabel;

/// Rename/restyle an existing remote label to its preset's canonical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelUpdate {
    /// Current name of the remote label (the key the platform knows it by).
    pub old_name: String,
    pub new_name: String,
    pub description: String,
    pub color: String,
}

impl LabelUpdate {
    fn to_preset(remote: &RemoteLabel, preset: &Label) -> Self {
        Self {
            old_name: remote.name.clone(),
            new_name: preset.name().to_string(),
            description: preset.description().to_string(),
            color: preset.color().to_string(),
        }
    }
}

/// The mutations needed to converge the repository on the preset catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationPlan {
    /// Remote labels to rename/restyle, in catalog order of their preset.
    pub updates: Vec<LabelUpdate>,
    /// Presets with no remote counterpart, in catalog order. Each becomes a
    /// label-creation request.
    pub missing: Vec<Label>,
}

impl ReconciliationPlan {
    /// Returns `true` if the repository already matches the catalog.
    pub fn is_converged(&self) -> bool {
        self.updates.is_empty() && self.missing.is_empty()
    }
}

/// Computes the [`ReconciliationPlan`] for `remote` against `catalog`.
///
/// Pure and deterministic: the same inputs always yield the same plan.
pub fn reconcile(remote: &[RemoteLabel], catalog: &LabelCatalog) -> ReconciliationPlan {
    let lowered: Vec<String> = remote.iter().map(|r| r.name.to_lowercase()).collect();
    let mut available = vec![true; remote.len()];
    let mut plan = ReconciliationPlan::default();

    for preset in catalog.labels() {
        let Some(index) = claim(preset, &lowered, &mut available) else {
            debug!(label = preset.name(), "No remote label matches preset");
            plan.missing.push(preset.clone());
            continue;
        };

        let matched = &remote[index];
        if preset.is_equivalent_to(matched) {
            debug!(label = preset.name(), "Preset already canonical");
        } else {
            debug!(
                label = preset.name(),
                remote = matched.name.as_str(),
                "Remote label drifted from preset"
            );
            plan.updates.push(LabelUpdate::to_preset(matched, preset));
        }
    }

    plan
}

/// Claims the first available remote label matching one of `preset`'s
/// aliases. First alias with any match wins; later aliases are not tried.
fn claim(preset: &Label, lowered: &[String], available: &mut [bool]) -> Option<usize> {
    for alias in preset.aliases() {
        let found = lowered
            .iter()
            .enumerate()
            .find(|&(i, name)| available[i] && name.contains(alias.as_str()))
            .map(|(i, _)| i);

        if let Some(i) = found {
            available[i] = false;
            return Some(i);
        }
    }
    None
}
