//! Expansion of the upstream tool's multi-letter short flags
//!
//! Options like `-fr` or `-std` are not expressible as clap shorts, so they
//! are rewritten to their long form before parsing. Only whole tokens in
//! option position are rewritten; option values pass through untouched.

use std::ffi::OsString;

use tracing::debug;

/// Legacy short flag and its long equivalent
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-sf", "--settings-file"),
    ("-of", "--output-file"),
    ("-std", "--stdout"),
    ("-fr", "--fromRef"),
    ("-tr", "--toRef"),
    ("-fc", "--fromCommit"),
    ("-tc", "--toCommit"),
    ("-ip", "--ignorePattern"),
    ("-js", "--jiraServer"),
    ("-jp", "--jiraPattern"),
    ("-gs", "--githubServer"),
    ("-gp", "--githubPattern"),
    ("-cn", "--customIssueName"),
    ("-cp", "--customIssuePattern"),
    ("-cl", "--customIssueLink"),
    ("-ut", "--untaggedName"),
    ("-tz", "--timeZone"),
    ("-df", "--date-format"),
    ("-ni", "--no-issue-name"),
    ("-rt", "--readable-tag-name"),
];

/// Long flags that do not take a value
const SWITCHES: &[&str] = &["--stdout", "--quiet", "--help", "--version"];

/// Short flags that take a value
const VALUED_SHORTS: &[&str] = &["-t", "-r"];

/// Rewrite legacy short flags to long flags. The first item (program name)
/// is kept as is.
pub fn expand_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut expanded = Vec::new();
    let mut args = args.into_iter().map(Into::into);

    if let Some(program) = args.next() {
        expanded.push(program);
    }

    let mut expects_value = false;
    let mut options_ended = false;

    for arg in args {
        if expects_value || options_ended {
            expects_value = false;
            expanded.push(arg);
            continue;
        }

        let Some(token) = arg.to_str().map(str::to_owned) else {
            expanded.push(arg);
            continue;
        };

        if token == "--" {
            options_ended = true;
            expanded.push(arg);
            continue;
        }

        let token = match LEGACY_FLAGS.iter().find(|(legacy, _)| *legacy == token) {
            Some((legacy, long)) => {
                debug!(legacy, long, "expanding legacy flag");
                (*long).to_string()
            }
            None => token,
        };

        expects_value = takes_value(&token);
        expanded.push(OsString::from(token));
    }

    expanded
}

fn takes_value(token: &str) -> bool {
    if token.starts_with("--") {
        !token.contains('=') && !SWITCHES.contains(&token)
    } else {
        VALUED_SHORTS.contains(&token)
    }
}
