//! CLI definition and command handling

pub mod legacy;
pub mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use console::style;
use tracing::info;

use git_changelog_core::{
    deliver, load_and_resolve, ChangelogEngine, FlagValues, ProcessSinks, SettingsEngine,
    SinkWriter,
};

/// git-changelog - generate a changelog from git history
#[derive(Debug, Parser)]
#[command(name = "git-changelog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use settings from file
    #[arg(long = "settings-file", value_name = "PATH")]
    pub settings_file: Option<PathBuf>,

    /// Print the changelog to <STDOUT>
    #[arg(long)]
    pub stdout: bool,

    /// Write the changelog to a file
    #[arg(long = "output-file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Template to use. A default template is used if not specified
    #[arg(short = 't', long, value_name = "PATH")]
    pub template: Option<String>,

    /// Repository
    #[arg(short = 'r', long, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// From ref
    #[arg(long = "fromRef", value_name = "REF")]
    pub from_ref: Option<String>,

    /// To ref
    #[arg(long = "toRef", value_name = "REF")]
    pub to_ref: Option<String>,

    /// From commit
    #[arg(long = "fromCommit", value_name = "SHA")]
    pub from_commit: Option<String>,

    /// To commit
    #[arg(long = "toCommit", value_name = "SHA")]
    pub to_commit: Option<String>,

    /// Ignore commits where the pattern matches the message
    #[arg(long = "ignorePattern", value_name = "REGEX")]
    pub ignore_pattern: Option<String>,

    /// Jira server. When given, Jira issue titles can be used in the changelog
    #[arg(long = "jiraServer", value_name = "URL")]
    pub jira_server: Option<String>,

    /// Jira issue pattern
    #[arg(long = "jiraPattern", value_name = "REGEX")]
    pub jira_pattern: Option<String>,

    /// Github server. When given, Github issue titles can be used in the changelog
    #[arg(long = "githubServer", value_name = "URL")]
    pub github_server: Option<String>,

    /// Github issue pattern
    #[arg(long = "githubPattern", value_name = "REGEX")]
    pub github_pattern: Option<String>,

    /// Custom issue name (requires pattern and link)
    #[arg(long = "customIssueName", value_name = "NAME")]
    pub custom_issue_name: Option<String>,

    /// Custom issue pattern (requires name and link)
    #[arg(long = "customIssuePattern", value_name = "REGEX")]
    pub custom_issue_pattern: Option<String>,

    /// Custom issue link (requires name and pattern)
    #[arg(long = "customIssueLink", value_name = "URL")]
    pub custom_issue_link: Option<String>,

    /// Name of the virtual tag holding commits not available in any git tag
    #[arg(long = "untaggedName", value_name = "TEXT")]
    pub untagged_name: Option<String>,

    /// Name of the virtual issue holding commits without an issue
    #[arg(long = "no-issue-name", value_name = "TEXT")]
    pub no_issue_name: Option<String>,

    /// Pattern extracting the readable part of a tag
    #[arg(long = "readable-tag-name", value_name = "REGEX")]
    pub readable_tag_name: Option<String>,

    /// Time zone to use when printing dates
    #[arg(long = "timeZone", value_name = "TZ")]
    pub time_zone: Option<String>,

    /// Format to use when printing dates
    #[arg(long = "date-format", value_name = "PATTERN")]
    pub date_format: Option<String>,

    /// Suppress the confirmation after writing a file
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Command-line input in the resolver's terms
    pub fn flag_values(&self) -> FlagValues {
        FlagValues {
            settings_file: self.settings_file.clone(),
            stdout: self.stdout,
            output_file: self.output_file.clone(),
            template: self.template.clone(),
            repo: self.repo.clone(),
            from_ref: self.from_ref.clone(),
            to_ref: self.to_ref.clone(),
            from_commit: self.from_commit.clone(),
            to_commit: self.to_commit.clone(),
            ignore_pattern: self.ignore_pattern.clone(),
            jira_server: self.jira_server.clone(),
            jira_pattern: self.jira_pattern.clone(),
            github_server: self.github_server.clone(),
            github_pattern: self.github_pattern.clone(),
            custom_issue_name: self.custom_issue_name.clone(),
            custom_issue_pattern: self.custom_issue_pattern.clone(),
            custom_issue_link: self.custom_issue_link.clone(),
            untagged_name: self.untagged_name.clone(),
            no_issue_name: self.no_issue_name.clone(),
            readable_tag_name: self.readable_tag_name.clone(),
            time_zone: self.time_zone.clone(),
            date_format: self.date_format.clone(),
        }
    }

    /// Execute with the built-in engine, writing to the real stdout and filesystem
    pub fn execute(&self) -> anyhow::Result<()> {
        self.execute_with(&SettingsEngine::new(), &mut ProcessSinks)
    }

    /// Resolve the configuration, render it with `engine` and deliver it through `writer`
    pub fn execute_with(
        &self,
        engine: &dyn ChangelogEngine,
        writer: &mut dyn SinkWriter,
    ) -> anyhow::Result<()> {
        info!(
            settings_file = ?self.settings_file,
            stdout = self.stdout,
            output_file = ?self.output_file,
            "executing changelog command"
        );
        let flags = self.flag_values();

        let config = load_and_resolve(engine.defaults(), &flags)?;
        let rendered = engine.render(&config)?;
        deliver(&rendered, &config.output_sinks, writer).context("Failed to write changelog")?;

        if let Some(path) = config.output_file() {
            // Keep stdout clean when the changelog itself goes there
            if !self.quiet && !config.writes_stdout() {
                output::success(&format!(
                    "Changelog written to {}",
                    style(path.display()).cyan()
                ));
            }
        }

        Ok(())
    }
}
