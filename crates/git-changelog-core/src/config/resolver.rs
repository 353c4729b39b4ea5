//! Configuration resolution
//!
//! Builds the [`Configuration`] handed to the changelog engine from three
//! layers, lowest precedence first:
//!
//! 1. built-in defaults (supplied by the engine),
//! 2. an optional settings file,
//! 3. command-line flags.
//!
//! Every defaulted flag overlays the lower layers, given or not: an absent
//! flag writes back the engine default (servers default to none). The range
//! selectors and the custom tracker only apply when given. The result is
//! validated before it is returned.

use std::path::PathBuf;

use tracing::{debug, instrument, warn};

use crate::error::Result;

use super::loader::{load_settings, SettingsFile};
use super::types::{Configuration, CustomIssue, CustomIssueParts, OutputSink, RangeBound, Settings};
use super::validation::validate_config;

/// Parsed command-line input.
///
/// `None` (or `false`) means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues {
    pub settings_file: Option<PathBuf>,
    pub stdout: bool,
    pub output_file: Option<PathBuf>,
    pub template: Option<String>,
    pub repo: Option<PathBuf>,
    pub from_ref: Option<String>,
    pub to_ref: Option<String>,
    pub from_commit: Option<String>,
    pub to_commit: Option<String>,
    pub ignore_pattern: Option<String>,
    pub jira_server: Option<String>,
    pub jira_pattern: Option<String>,
    pub github_server: Option<String>,
    pub github_pattern: Option<String>,
    pub custom_issue_name: Option<String>,
    pub custom_issue_pattern: Option<String>,
    pub custom_issue_link: Option<String>,
    pub untagged_name: Option<String>,
    pub no_issue_name: Option<String>,
    pub readable_tag_name: Option<String>,
    pub time_zone: Option<String>,
    pub date_format: Option<String>,
}

impl FlagValues {
    /// Output sinks requested on the command line, stdout first
    pub fn output_sinks(&self) -> Vec<OutputSink> {
        let mut sinks = Vec::new();
        if self.stdout {
            sinks.push(OutputSink::Stdout);
        }
        if let Some(path) = &self.output_file {
            sinks.push(OutputSink::File(path.clone()));
        }
        sinks
    }

    fn apply_to(&self, settings: &mut Settings, defaults: &Settings) {
        settings.repo = self.repo.clone().unwrap_or_else(|| defaults.repo.clone());

        // Commit first, then ref: a ref given alongside a commit wins
        if let Some(from) = RangeBound::select(self.from_commit.as_deref(), self.from_ref.as_deref())
        {
            settings.range.from = from;
        }
        if let Some(to) = RangeBound::select(self.to_commit.as_deref(), self.to_ref.as_deref()) {
            settings.range.to = to;
        }

        let strings = [
            (&mut settings.template_path, &self.template, &defaults.template_path),
            (&mut settings.untagged_name, &self.untagged_name, &defaults.untagged_name),
            (&mut settings.no_issue_name, &self.no_issue_name, &defaults.no_issue_name),
            (
                &mut settings.readable_tag_name,
                &self.readable_tag_name,
                &defaults.readable_tag_name,
            ),
            (&mut settings.ignore_pattern, &self.ignore_pattern, &defaults.ignore_pattern),
            (&mut settings.time_zone, &self.time_zone, &defaults.time_zone),
            (&mut settings.date_format, &self.date_format, &defaults.date_format),
            (&mut settings.jira.pattern, &self.jira_pattern, &defaults.jira.pattern),
            (&mut settings.github.pattern, &self.github_pattern, &defaults.github.pattern),
        ];
        for (field, value, default) in strings {
            *field = value.as_ref().unwrap_or(default).clone();
        }

        settings.jira.server = self.jira_server.clone();
        settings.github.server = self.github_server.clone();

        match CustomIssue::from_parts(
            self.custom_issue_name.as_deref(),
            self.custom_issue_pattern.as_deref(),
            self.custom_issue_link.as_deref(),
        ) {
            CustomIssueParts::Complete(custom) => {
                debug!(name = %custom.name, "registering custom issue tracker");
                settings.custom_issues.push(custom);
            }
            CustomIssueParts::Absent => {}
            CustomIssueParts::Partial { missing } => {
                warn!(
                    missing = %missing.join(", "),
                    "custom issue tracker needs name, pattern and link together; ignoring it"
                );
            }
        }
    }
}

/// Resolve the configuration from defaults, an optional settings file and flags.
///
/// Pure: `flags.settings_file` is not read here, the already loaded document
/// is passed as `settings_file`.
#[instrument(skip_all, fields(settings_file = ?settings_file.map(|f| &f.path)))]
pub fn resolve(
    defaults: Settings,
    settings_file: Option<&SettingsFile>,
    flags: &FlagValues,
) -> Result<Configuration> {
    let mut settings = defaults.clone();

    if let Some(file) = settings_file {
        debug!(path = %file.path.display(), "applying settings file");
        settings.apply_overlay(&file.overlay);
    }

    flags.apply_to(&mut settings, &defaults);

    let config = Configuration::from_settings(
        settings,
        settings_file.map(|f| f.path.clone()),
        flags.output_sinks(),
    );
    validate_config(&config)?;

    debug!(
        from = %config.range.from,
        to = %config.range.to,
        sinks = config.output_sinks.len(),
        trackers = config.issue_trackers.len(),
        "configuration resolved"
    );
    Ok(config)
}

/// Read `flags.settings_file`, if any, and resolve.
pub fn load_and_resolve(defaults: Settings, flags: &FlagValues) -> Result<Configuration> {
    let settings_file = flags
        .settings_file
        .as_deref()
        .map(load_settings)
        .transpose()?;
    resolve(defaults, settings_file.as_ref(), flags)
}
