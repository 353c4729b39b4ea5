//! Configuration types

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::defaults;

/// One end of the commit range.
///
/// A side is either a symbolic ref or a concrete commit, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RangeBound {
    /// Symbolic ref (tag, branch, `refs/...`)
    Ref(String),
    /// Concrete commit id
    Commit(String),
}

impl RangeBound {
    /// Pick the bound for one side from an optional commit and an optional ref.
    ///
    /// The commit is applied first and the ref second, so a ref always wins
    /// when both are present. Returns `None` when neither was supplied.
    pub fn select(commit: Option<&str>, reference: Option<&str>) -> Option<Self> {
        let mut bound = None;
        if let Some(commit) = commit {
            bound = Some(Self::Commit(commit.to_string()));
        }
        if let Some(reference) = reference {
            bound = Some(Self::Ref(reference.to_string()));
        }
        bound
    }

    /// The raw ref or commit string
    pub fn value(&self) -> &str {
        match self {
            Self::Ref(value) | Self::Commit(value) => value,
        }
    }

    /// The ref name, if this bound is a ref
    pub fn as_ref_name(&self) -> Option<&str> {
        match self {
            Self::Ref(name) => Some(name),
            Self::Commit(_) => None,
        }
    }

    /// The commit id, if this bound is a commit
    pub fn as_commit(&self) -> Option<&str> {
        match self {
            Self::Commit(id) => Some(id),
            Self::Ref(_) => None,
        }
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(name) => write!(f, "ref {}", name),
            Self::Commit(id) => write!(f, "commit {}", id),
        }
    }
}

/// The pair of bounds delimiting which commits end up in the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelector {
    /// Lower bound
    pub from: RangeBound,
    /// Upper bound
    pub to: RangeBound,
}

/// Server and pattern for a built-in tracker integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Server URL, used to build issue links and fetch titles
    pub server: Option<String>,
    /// Pattern matching issue references in commit messages
    pub pattern: String,
}

/// A user-defined issue tracker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomIssue {
    /// Display name of the tracker
    pub name: String,
    /// Pattern matching issue references in commit messages
    pub pattern: String,
    /// Link template for matched issues
    pub link: String,
}

/// Outcome of assembling a [`CustomIssue`] from individually optional parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomIssueParts {
    /// All three parts were supplied
    Complete(CustomIssue),
    /// None of the parts were supplied
    Absent,
    /// Some, but not all, parts were supplied
    Partial {
        /// Names of the missing parts
        missing: Vec<&'static str>,
    },
}

impl CustomIssue {
    /// Create a new custom issue tracker
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            link: link.into(),
        }
    }

    /// Build a tracker only when name, pattern and link are all present.
    pub fn from_parts(
        name: Option<&str>,
        pattern: Option<&str>,
        link: Option<&str>,
    ) -> CustomIssueParts {
        match (name, pattern, link) {
            (Some(name), Some(pattern), Some(link)) => {
                CustomIssueParts::Complete(Self::new(name, pattern, link))
            }
            (None, None, None) => CustomIssueParts::Absent,
            _ => {
                let missing = [("name", name), ("pattern", pattern), ("link", link)]
                    .into_iter()
                    .filter(|(_, part)| part.is_none())
                    .map(|(label, _)| label)
                    .collect();
                CustomIssueParts::Partial { missing }
            }
        }
    }
}

/// A tracker integration, in the order the engine should consult them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IssueTracker {
    /// Jira integration
    Jira {
        server: Option<String>,
        pattern: String,
    },
    /// Github integration
    Github {
        server: Option<String>,
        pattern: String,
    },
    /// User-defined tracker
    Custom(CustomIssue),
}

impl IssueTracker {
    /// Human-readable tracker name
    pub fn name(&self) -> &str {
        match self {
            Self::Jira { .. } => "Jira",
            Self::Github { .. } => "Github",
            Self::Custom(custom) => &custom.name,
        }
    }

    /// Issue reference pattern
    pub fn pattern(&self) -> &str {
        match self {
            Self::Jira { pattern, .. } | Self::Github { pattern, .. } => pattern,
            Self::Custom(custom) => &custom.pattern,
        }
    }
}

/// Destination for rendered output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSink {
    /// Standard output
    Stdout,
    /// A file, overwritten on each run
    File(PathBuf),
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Layered settings before output sinks are attached and validation runs.
///
/// Built-in defaults and the settings file both produce this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Repository location
    pub repo: PathBuf,
    /// Commit range
    pub range: RangeSelector,
    /// Template reference
    pub template_path: String,
    /// Name of the virtual tag holding commits not in any tag
    pub untagged_name: String,
    /// Name of the virtual issue holding commits without an issue
    pub no_issue_name: String,
    /// Pattern extracting the readable part of a tag name
    pub readable_tag_name: String,
    /// Commits whose message matches are left out
    pub ignore_pattern: String,
    /// Time zone used when printing dates
    pub time_zone: String,
    /// Format used when printing dates
    pub date_format: String,
    /// Jira integration
    pub jira: TrackerSettings,
    /// Github integration
    pub github: TrackerSettings,
    /// User-defined trackers
    pub custom_issues: Vec<CustomIssue>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo: PathBuf::from(defaults::DEFAULT_REPO),
            range: RangeSelector {
                from: RangeBound::Commit(defaults::ZERO_COMMIT.to_string()),
                to: RangeBound::Ref(defaults::DEFAULT_TO_REF.to_string()),
            },
            template_path: defaults::DEFAULT_TEMPLATE.to_string(),
            untagged_name: defaults::DEFAULT_UNTAGGED_NAME.to_string(),
            no_issue_name: defaults::DEFAULT_NO_ISSUE_NAME.to_string(),
            readable_tag_name: defaults::DEFAULT_READABLE_TAG_NAME.to_string(),
            ignore_pattern: defaults::DEFAULT_IGNORE_PATTERN.to_string(),
            time_zone: defaults::DEFAULT_TIME_ZONE.to_string(),
            date_format: defaults::DEFAULT_DATE_FORMAT.to_string(),
            jira: TrackerSettings {
                server: None,
                pattern: defaults::DEFAULT_JIRA_PATTERN.to_string(),
            },
            github: TrackerSettings {
                server: None,
                pattern: defaults::DEFAULT_GITHUB_PATTERN.to_string(),
            },
            custom_issues: Vec::new(),
        }
    }
}

impl Settings {
    /// Overlay the values present in a settings document
    pub fn apply_overlay(&mut self, overlay: &SettingsOverlay) {
        if let Some(repo) = &overlay.from_repo {
            self.repo = repo.clone();
        }
        if let Some(from) =
            RangeBound::select(overlay.from_commit.as_deref(), overlay.from_ref.as_deref())
        {
            self.range.from = from;
        }
        if let Some(to) =
            RangeBound::select(overlay.to_commit.as_deref(), overlay.to_ref.as_deref())
        {
            self.range.to = to;
        }

        let strings = [
            (&mut self.template_path, &overlay.template_path),
            (&mut self.untagged_name, &overlay.untagged_name),
            (&mut self.no_issue_name, &overlay.no_issue_name),
            (&mut self.readable_tag_name, &overlay.readable_tag_name),
            (&mut self.ignore_pattern, &overlay.ignore_commits_if_message_matches),
            (&mut self.time_zone, &overlay.time_zone),
            (&mut self.date_format, &overlay.date_format),
            (&mut self.jira.pattern, &overlay.jira_issue_pattern),
            (&mut self.github.pattern, &overlay.github_issue_pattern),
        ];
        for (field, value) in strings {
            if let Some(value) = value {
                *field = value.clone();
            }
        }

        if overlay.jira_server.is_some() {
            self.jira.server = overlay.jira_server.clone();
        }
        if overlay.github_api.is_some() {
            self.github.server = overlay.github_api.clone();
        }
        self.custom_issues.extend(overlay.custom_issues.iter().cloned());
    }

    /// Tracker integrations in consultation order: Jira, Github, then custom ones
    pub fn issue_trackers(&self) -> Vec<IssueTracker> {
        let mut trackers = vec![
            IssueTracker::Jira {
                server: self.jira.server.clone(),
                pattern: self.jira.pattern.clone(),
            },
            IssueTracker::Github {
                server: self.github.server.clone(),
                pattern: self.github.pattern.clone(),
            },
        ];
        trackers.extend(self.custom_issues.iter().cloned().map(IssueTracker::Custom));
        trackers
    }
}

/// Settings document schema.
///
/// Every field is optional; present fields overlay the running settings.
/// Field names follow the upstream changelog library so existing settings
/// files keep working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_repo: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_commits_if_message_matches: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readable_tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untagged_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_issue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_issue_pattern: Option<String>,
    #[serde(default, alias = "githubServer", skip_serializing_if = "Option::is_none")]
    pub github_api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_issue_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_issues: Vec<CustomIssue>,
}

/// The resolved, validated configuration handed to the changelog engine.
///
/// Only produced by [`super::resolve`]; at least one output sink is always
/// present and each range side holds exactly one bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// Settings file merged under the flags, if any
    pub settings_file: Option<PathBuf>,
    /// Where rendered output goes, stdout first
    pub output_sinks: Vec<OutputSink>,
    /// Template reference
    pub template_path: String,
    /// Repository location
    pub repo: PathBuf,
    /// Commit range
    pub range: RangeSelector,
    pub untagged_name: String,
    pub no_issue_name: String,
    pub readable_tag_name: String,
    pub ignore_pattern: String,
    pub time_zone: String,
    pub date_format: String,
    /// Tracker integrations in consultation order
    pub issue_trackers: Vec<IssueTracker>,
}

impl Configuration {
    pub(crate) fn from_settings(
        settings: Settings,
        settings_file: Option<PathBuf>,
        output_sinks: Vec<OutputSink>,
    ) -> Self {
        let issue_trackers = settings.issue_trackers();
        Self {
            settings_file,
            output_sinks,
            template_path: settings.template_path,
            repo: settings.repo,
            range: settings.range,
            untagged_name: settings.untagged_name,
            no_issue_name: settings.no_issue_name,
            readable_tag_name: settings.readable_tag_name,
            ignore_pattern: settings.ignore_pattern,
            time_zone: settings.time_zone,
            date_format: settings.date_format,
            issue_trackers,
        }
    }

    /// Whether output goes to standard output
    pub fn writes_stdout(&self) -> bool {
        self.output_sinks.contains(&OutputSink::Stdout)
    }

    /// The output file, if one was requested
    pub fn output_file(&self) -> Option<&Path> {
        self.output_sinks.iter().find_map(|sink| match sink {
            OutputSink::File(path) => Some(path.as_path()),
            OutputSink::Stdout => None,
        })
    }

    /// Custom trackers only
    pub fn custom_issues(&self) -> impl Iterator<Item = &CustomIssue> {
        self.issue_trackers.iter().filter_map(|tracker| match tracker {
            IssueTracker::Custom(custom) => Some(custom),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_prefers_ref_over_commit() {
        assert_eq!(
            RangeBound::select(Some("abc123"), Some("v1.0")),
            Some(RangeBound::Ref("v1.0".to_string()))
        );
        assert_eq!(
            RangeBound::select(Some("abc123"), None),
            Some(RangeBound::Commit("abc123".to_string()))
        );
        assert_eq!(RangeBound::select(None, None), None);
    }

    #[test]
    fn test_custom_issue_from_parts() {
        assert_eq!(
            CustomIssue::from_parts(Some("JIRA"), Some(r"JIRA-\d+"), Some("https://x/${PATTERN_GROUP}")),
            CustomIssueParts::Complete(CustomIssue::new(
                "JIRA",
                r"JIRA-\d+",
                "https://x/${PATTERN_GROUP}"
            ))
        );
        assert_eq!(CustomIssue::from_parts(None, None, None), CustomIssueParts::Absent);
        assert_eq!(
            CustomIssue::from_parts(Some("JIRA"), Some(r"JIRA-\d+"), None),
            CustomIssueParts::Partial {
                missing: vec!["link"]
            }
        );
        assert_eq!(
            CustomIssue::from_parts(None, None, Some("https://x")),
            CustomIssueParts::Partial {
                missing: vec!["name", "pattern"]
            }
        );
    }

    #[test]
    fn test_overlay_replaces_only_present_fields() {
        let mut settings = Settings::default();
        let overlay = SettingsOverlay {
            untagged_name: Some("Unreleased".to_string()),
            to_commit: Some("def456".to_string()),
            github_api: Some("https://api.github.com/repos/o/r".to_string()),
            ..Default::default()
        };
        settings.apply_overlay(&overlay);

        assert_eq!(settings.untagged_name, "Unreleased");
        assert_eq!(settings.range.to, RangeBound::Commit("def456".to_string()));
        assert_eq!(settings.github.server.as_deref(), Some("https://api.github.com/repos/o/r"));
        assert_eq!(settings.time_zone, defaults::DEFAULT_TIME_ZONE);
        assert_eq!(settings.range.from, Settings::default().range.from);
    }

    #[test]
    fn test_issue_tracker_order() {
        let mut settings = Settings::default();
        settings.custom_issues.push(CustomIssue::new("Bugzilla", "bug(\\d+)", "https://bz/${PATTERN_GROUP_1}"));

        let names: Vec<_> = settings
            .issue_trackers()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, ["Jira", "Github", "Bugzilla"]);
    }

    #[test]
    fn test_output_sink_display() {
        assert_eq!(OutputSink::Stdout.to_string(), "<stdout>");
        assert_eq!(OutputSink::File(PathBuf::from("out.md")).to_string(), "out.md");
    }
}
