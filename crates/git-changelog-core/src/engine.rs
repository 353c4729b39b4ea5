//! Changelog engine seam
//!
//! The engine owns history walking and template rendering. This crate only
//! supplies it with a resolved [`Configuration`].

use tracing::{debug, instrument};

use crate::config::{Configuration, IssueTracker, Settings, SettingsOverlay};
use crate::error::{Error, Result};

/// A changelog generator consuming a resolved configuration
pub trait ChangelogEngine {
    /// The engine's built-in baseline settings
    fn defaults(&self) -> Settings {
        Settings::default()
    }

    /// Render output for the given configuration
    fn render(&self, config: &Configuration) -> Result<String>;
}

/// Built-in engine that renders the resolved settings as a JSON settings
/// document.
///
/// The output can be passed back through `--settings-file`, or handed to an
/// external generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsEngine;

impl SettingsEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogEngine for SettingsEngine {
    #[instrument(skip_all, fields(repo = %config.repo.display()))]
    fn render(&self, config: &Configuration) -> Result<String> {
        let document = SettingsOverlay::from(config);
        let output =
            serde_json::to_string_pretty(&document).map_err(|e| Error::render(e.to_string()))?;
        debug!(output_len = output.len(), "settings document rendered");
        Ok(output)
    }
}

impl From<&Configuration> for SettingsOverlay {
    fn from(config: &Configuration) -> Self {
        let mut document = SettingsOverlay {
            from_repo: Some(config.repo.clone()),
            from_ref: config.range.from.as_ref_name().map(str::to_string),
            from_commit: config.range.from.as_commit().map(str::to_string),
            to_ref: config.range.to.as_ref_name().map(str::to_string),
            to_commit: config.range.to.as_commit().map(str::to_string),
            ignore_commits_if_message_matches: Some(config.ignore_pattern.clone()),
            readable_tag_name: Some(config.readable_tag_name.clone()),
            date_format: Some(config.date_format.clone()),
            untagged_name: Some(config.untagged_name.clone()),
            no_issue_name: Some(config.no_issue_name.clone()),
            time_zone: Some(config.time_zone.clone()),
            template_path: Some(config.template_path.clone()),
            ..Default::default()
        };

        for tracker in &config.issue_trackers {
            match tracker {
                IssueTracker::Jira { server, pattern } => {
                    document.jira_server = server.clone();
                    document.jira_issue_pattern = Some(pattern.clone());
                }
                IssueTracker::Github { server, pattern } => {
                    document.github_api = server.clone();
                    document.github_issue_pattern = Some(pattern.clone());
                }
                IssueTracker::Custom(custom) => document.custom_issues.push(custom.clone()),
            }
        }

        document
    }
}
