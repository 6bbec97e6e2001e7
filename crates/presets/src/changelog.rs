//! Changelog drafting for draft releases.
//!
//! Pull requests merged since the last published release are grouped under a
//! header derived from their category label, rendered as a Markdown
//! `## Changelog` section, and spliced into the draft release body.
//!
//! Published releases are never rewritten.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CollectionKind;
use crate::model::{PullRequest, Release};
use crate::DateRange;

/// Title line that opens the changelog section.
pub const CHANGELOG_TITLE: &str = "## Changelog";

/// Header for pull requests without a category label.
pub const OTHERS_HEADER: &str = "### 🧱 Others";

/// Separates the leading emoji from the title in a label name:
/// `"🐛 Issue.Bug"` splits into `"🐛"` and `"Bug"`.
static HEADER_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" .*\.").expect("header delimiter pattern is valid"));

/// Tunables for [`ChangelogDrafter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogSettings {
    /// Title line of the changelog section.
    pub title: String,
    /// Collection whose labels choose a pull request's header.
    pub category: CollectionKind,
}

impl Default for ChangelogSettings {
    fn default() -> Self {
        Self {
            title: CHANGELOG_TITLE.to_string(),
            category: CollectionKind::Issue,
        }
    }
}

/// Renders changelogs and splices them into release bodies.
#[derive(Debug, Clone, Default)]
pub struct ChangelogDrafter {
    settings: ChangelogSettings,
}

impl ChangelogDrafter {
    pub fn new(settings: ChangelogSettings) -> Self {
        Self { settings }
    }

    /// Returns the new body for `current`.
    ///
    /// If `current` is not a draft its body is returned unchanged. Otherwise
    /// only pull requests merged strictly after `last_published`'s
    /// publication time are included (all merged ones if there is no prior
    /// release), and the rendered changelog replaces any existing changelog
    /// section or is appended after a blank line.
    pub fn draft_release(
        &self,
        current: &Release,
        last_published: Option<&Release>,
        merged: &[PullRequest],
    ) -> String {
        if !current.draft {
            debug!(release = %current.id, "Release is published; body left unchanged");
            return current.body.clone();
        }

        let window = DateRange::since(last_published.and_then(|r| r.published_at));
        let recent: Vec<&PullRequest> = merged
            .iter()
            .filter(|pr| pr.merged_at.is_some_and(|at| window.contains(at)))
            .collect();
        debug!(
            release = %current.id,
            candidates = merged.len(),
            included = recent.len(),
            "Drafting changelog"
        );

        let changelog = self.render(&recent);
        self.splice(&current.body, &changelog)
    }

    /// Renders the changelog section for `pull_requests`.
    ///
    /// Groups appear in first-seen order; within a group pull requests keep
    /// their input order.
    pub fn render(&self, pull_requests: &[&PullRequest]) -> String {
        let mut groups: Vec<(String, String)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for pr in pull_requests {
            let header = pr
                .category_label(self.settings.category)
                .map_or_else(|| OTHERS_HEADER.to_string(), |l| header_for(l.name()));
            let line = format!("- {} (#{})\n", pr.title, pr.number);

            match index.get(&header) {
                Some(&i) => groups[i].1.push_str(&line),
                None => {
                    index.insert(header.clone(), groups.len());
                    groups.push((header, line));
                }
            }
        }

        let mut changelog = format!("{}\n", self.settings.title);
        for (header, lines) in &groups {
            changelog.push_str(header);
            changelog.push('\n');
            changelog.push_str(lines);
        }
        changelog
    }

    /// A changelog section runs from its title line to the end of the body.
    fn splice(&self, body: &str, changelog: &str) -> String {
        match body.find(&self.settings.title) {
            Some(start) => format!("{}{}", &body[..start], changelog),
            None => format!("{}\n\n{}", body.trim_end(), changelog),
        }
    }
}

/// Derives a level-3 header from a category label name.
///
/// Names without the `" <collection>."` delimiter are used whole.
pub fn header_for(label_name: &str) -> String {
    let mut parts = HEADER_DELIMITER.splitn(label_name, 2);
    let emoji = parts.next().unwrap_or_default();
    match parts.next() {
        Some(title) => format!("### {emoji} {title}"),
        None => format!("### {label_name}"),
    }
}

/// [`ChangelogDrafter::draft_release`] with default settings.
pub fn draft_release(
    current: &Release,
    last_published: Option<&Release>,
    merged: &[PullRequest],
) -> String {
    ChangelogDrafter::default().draft_release(current, last_published, merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LabelAction, LabelCatalog};
    use crate::{IssueNumber, ReleaseId, Timestamp};
    use chrono::{TimeZone, Utc};

    fn ts(day: u32) -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap())
    }

    fn draft(body: &str) -> Release {
        Release {
            id: ReleaseId::new(1),
            body: body.to_string(),
            draft: true,
            published_at: None,
        }
    }

    fn published(day: u32) -> Release {
        Release {
            id: ReleaseId::new(0),
            body: String::new(),
            draft: false,
            published_at: Some(ts(day)),
        }
    }

    fn pr(number: u64, title: &str, action: Option<LabelAction>, merged_day: u32) -> PullRequest {
        let catalog = LabelCatalog::preset().unwrap();
        PullRequest {
            number: IssueNumber::new(number),
            title: title.to_string(),
            labels: action
                .and_then(|a| catalog.get(CollectionKind::Issue, a))
                .cloned()
                .into_iter()
                .collect(),
            merged_at: Some(ts(merged_day)),
            draft: false,
        }
    }

    #[test]
    fn test_existing_changelog_section_is_replaced() {
        let release = draft("Notes\n\n## Changelog\nold text");
        let prs = vec![pr(7, "Fix bug", None, 2)];

        let body = draft_release(&release, None, &prs);

        assert_eq!(body, "Notes\n\n## Changelog\n### 🧱 Others\n- Fix bug (#7)\n");
    }

    #[test]
    fn test_changelog_appended_when_absent() {
        let release = draft("Release notes.\n\n  \n");
        let prs = vec![pr(1, "Add feature", Some(LabelAction::Feature), 2)];

        let body = draft_release(&release, None, &prs);

        assert_eq!(
            body,
            "Release notes.\n\n## Changelog\n### ✨ Feature\n- Add feature (#1)\n"
        );
    }

    #[test]
    fn test_empty_body_keeps_blank_line_separator() {
        let prs = vec![pr(2, "Tidy up", None, 3)];

        let expected = "\n\n## Changelog\n### 🧱 Others\n- Tidy up (#2)\n";
        assert_eq!(draft_release(&draft(""), None, &prs), expected);
        assert_eq!(draft_release(&draft(" \n\t"), None, &prs), expected);
    }

    #[test]
    fn test_published_release_is_untouched() {
        let mut release = draft("Final notes");
        release.draft = false;
        let prs = vec![pr(1, "Anything", None, 2)];

        assert_eq!(draft_release(&release, None, &prs), "Final notes");
    }

    #[test]
    fn test_only_prs_merged_after_last_release_are_listed() {
        let prs = vec![
            pr(1, "Before", None, 3),
            pr(2, "Same instant", None, 5),
            pr(3, "After", None, 6),
        ];

        let body = draft_release(&draft(""), Some(&published(5)), &prs);

        assert_eq!(body, "## Changelog\n### 🧱 Others\n- After (#3)\n");
    }

    #[test]
    fn test_unmerged_prs_are_skipped() {
        let mut open = pr(4, "Still open", None, 1);
        open.merged_at = None;

        let body = draft_release(&draft(""), None, &[open]);

        assert_eq!(body, "## Changelog\n");
    }

    #[test]
    fn test_every_pr_lands_in_its_own_category_group() {
        // Continuation lines of a category group stay in that group rather
        // than being appended to the "Others" bucket.
        let prs = vec![
            pr(1, "Crash on start", Some(LabelAction::Bug), 2),
            pr(2, "Misc cleanup", None, 2),
            pr(3, "Crash on exit", Some(LabelAction::Bug), 2),
            pr(4, "Dark mode", Some(LabelAction::Feature), 2),
            pr(5, "Bump deps", None, 2),
        ];

        let body = draft_release(&draft(""), None, &prs);

        assert_eq!(
            body,
            "## Changelog\n\
             ### 🐛 Bug\n- Crash on start (#1)\n- Crash on exit (#3)\n\
             ### 🧱 Others\n- Misc cleanup (#2)\n- Bump deps (#5)\n\
             ### ✨ Feature\n- Dark mode (#4)\n"
        );
    }

    #[test]
    fn test_header_for_splits_emoji_and_title() {
        assert_eq!(header_for("🐛 Issue.Bug"), "### 🐛 Bug");
        assert_eq!(header_for("📝 Issue.Documentation"), "### 📝 Documentation");
    }

    #[test]
    fn test_header_for_name_without_delimiter() {
        assert_eq!(header_for("bug"), "### bug");
    }

    #[test]
    fn test_custom_title_and_category() {
        let drafter = ChangelogDrafter::new(ChangelogSettings {
            title: "## What's changed".into(),
            category: CollectionKind::PullRequest,
        });
        let prs = vec![pr(9, "Tidy", Some(LabelAction::Bug), 2)];

        let body = drafter.draft_release(&draft("## What's changed\nstale"), None, &prs);

        assert_eq!(body, "## What's changed\n### 🧱 Others\n- Tidy (#9)\n");
    }
}
