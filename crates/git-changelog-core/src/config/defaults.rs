//! Default configuration values

/// Repository location when none is given
pub const DEFAULT_REPO: &str = ".";

/// Commit id that sorts before every real commit
pub const ZERO_COMMIT: &str = "0000000000000000000000000000000000000000";

/// Upper range bound when none is given
pub const DEFAULT_TO_REF: &str = "refs/heads/master";

/// Built-in template identifier
pub const DEFAULT_TEMPLATE: &str = "changelog.mustache";

/// Virtual tag holding commits that are not in any tag
pub const DEFAULT_UNTAGGED_NAME: &str = "No tag";

/// Virtual issue holding commits without an issue reference
pub const DEFAULT_NO_ISSUE_NAME: &str = "No issue";

/// Extracts the last path segment of a tag name
pub const DEFAULT_READABLE_TAG_NAME: &str = "/([^/]+?)$";

/// Release-plugin and merge commits are ignored
pub const DEFAULT_IGNORE_PATTERN: &str =
    r"^\[maven-release-plugin\].*|^\[Gradle Release Plugin\].*|^Merge.*";

/// Time zone used when printing dates
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// Date pattern in the engine's format syntax
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-dd HH:mm:ss";

/// Matches Jira keys such as `ABC-123`
pub const DEFAULT_JIRA_PATTERN: &str = r"\b[a-zA-Z]([a-zA-Z]+)-([0-9]+)\b";

/// Matches Github references such as `#42`
pub const DEFAULT_GITHUB_PATTERN: &str = "#([0-9]+)";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RangeBound, Settings};

    #[test]
    fn test_default_range() {
        let settings = Settings::default();
        assert_eq!(settings.range.from, RangeBound::Commit(ZERO_COMMIT.to_string()));
        assert_eq!(settings.range.to, RangeBound::Ref(DEFAULT_TO_REF.to_string()));
    }
}
