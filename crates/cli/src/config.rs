//! Optional settings file (`.labelkeeper/config.toml`).
//!
//! ```toml
//! [changelog]
//! title = "## Changelog"
//! category = "Issue"
//! ```
//!
//! Every key is optional; a missing file means all defaults.

use std::path::Path;

use serde::Deserialize;

use presets::{ChangelogSettings, LabelKeeperError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub changelog: ChangelogSettings,
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults if it does not
    /// exist.
    pub fn load(path: &Path) -> Result<Self, LabelKeeperError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| LabelKeeperError::ConfigurationError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::parse(&text).map_err(|message| LabelKeeperError::ConfigurationError {
            message: format!("{}: {message}", path.display()),
        })
    }

    fn parse(text: &str) -> Result<Self, String> {
        let settings: Settings = toml::from_str(text).map_err(|e| e.to_string())?;
        if settings.changelog.title.trim().is_empty() {
            return Err("changelog.title must not be empty".into());
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presets::CollectionKind;

    #[test]
    fn test_empty_file_is_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_overrides_are_read() {
        let settings = Settings::parse(
            r###"
            [changelog]
            title = "## What's Changed"
            category = "PR"
            "###,
        )
        .unwrap();
        assert_eq!(settings.changelog.title, "## What's Changed");
        assert_eq!(settings.changelog.category, CollectionKind::PullRequest);
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(Settings::parse("[changelog]\ntitle = \"  \"").is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Settings::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/labelkeeper.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
