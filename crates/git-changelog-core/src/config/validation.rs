//! Configuration validation
//!
//! Only the output sinks can fail resolution. Patterns are handed to the
//! engine unchanged; ones the `regex` crate cannot read are reported as
//! warnings, since the engine may use a richer dialect (look-around etc).

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

use super::types::{Configuration, IssueTracker, OutputSink};

/// Validate a resolved configuration.
///
/// The output sink check runs first so a missing sink is always reported
/// as such.
pub fn validate_config(config: &Configuration) -> Result<()> {
    debug!("validating configuration");
    validate_output(config)?;
    check_patterns(config);
    debug!("configuration validation passed");
    Ok(())
}

fn validate_output(config: &Configuration) -> Result<()> {
    if config.output_sinks.is_empty() {
        return Err(ConfigError::MissingOutputSink.into());
    }

    for sink in &config.output_sinks {
        if let OutputSink::File(path) = sink {
            if path.as_os_str().is_empty() {
                return Err(
                    ConfigError::invalid("output-file", "file path cannot be empty").into(),
                );
            }
        }
    }

    Ok(())
}

type Warnings = Vec<(&'static str, String)>;

fn check(warnings: &mut Warnings, field: &'static str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warnings.push((field, e.to_string()));
            None
        }
    }
}

/// Pattern diagnostics as `(field, message)` pairs
fn pattern_warnings(config: &Configuration) -> Warnings {
    let mut warnings = Vec::new();

    check(&mut warnings, "ignorePattern", &config.ignore_pattern);

    // Group 1 is the readable part
    if let Some(readable) = check(&mut warnings, "readable-tag-name", &config.readable_tag_name) {
        if readable.captures_len() < 2 {
            warnings.push((
                "readable-tag-name",
                "no capture group for the readable part".to_string(),
            ));
        }
    }

    for tracker in &config.issue_trackers {
        match tracker {
            IssueTracker::Jira { pattern, .. } => {
                check(&mut warnings, "jiraPattern", pattern);
            }
            IssueTracker::Github { pattern, .. } => {
                check(&mut warnings, "githubPattern", pattern);
            }
            IssueTracker::Custom(custom) => {
                check(&mut warnings, "customIssuePattern", &custom.pattern);
            }
        }
    }

    warnings
}

fn check_patterns(config: &Configuration) {
    for (field, message) in pattern_warnings(config) {
        warn!(field, %message, "pattern passed to the engine unchecked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CustomIssue, RangeBound, Settings};
    use crate::error::Error;
    use std::path::PathBuf;

    fn config() -> Configuration {
        Configuration::from_settings(Settings::default(), None, vec![OutputSink::Stdout])
    }

    fn warned_fields(config: &Configuration) -> Vec<&'static str> {
        pattern_warnings(config).into_iter().map(|(field, _)| field).collect()
    }

    #[test]
    fn test_validate_default_config() {
        let config = config();
        assert!(validate_config(&config).is_ok());
        assert!(pattern_warnings(&config).is_empty());
    }

    #[test]
    fn test_validate_missing_sink() {
        let mut config = config();
        config.output_sinks.clear();
        config.ignore_pattern = "(".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::MissingOutputSink))
        ));
    }

    #[test]
    fn test_validate_empty_output_file() {
        let mut config = config();
        config.output_sinks = vec![OutputSink::File(PathBuf::new())];
        match validate_config(&config) {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, "output-file")
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_values_are_accepted() {
        let mut config = config();
        config.range.to = RangeBound::Ref(String::new());
        config.untagged_name = String::new();
        config.date_format = String::new();
        config
            .issue_trackers
            .push(IssueTracker::Custom(CustomIssue::new("", "bug-([0-9]+)", "")));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unreadable_patterns_only_warn() {
        let mut config = config();
        config.ignore_pattern = "^(?!feat).*".to_string();
        config.readable_tag_name = "/[^/]+$".to_string();
        config
            .issue_trackers
            .push(IssueTracker::Custom(CustomIssue::new("Bugs", "bug-(", "https://bugs")));

        assert!(validate_config(&config).is_ok());
        assert_eq!(
            warned_fields(&config),
            ["ignorePattern", "readable-tag-name", "customIssuePattern"]
        );
    }
}
