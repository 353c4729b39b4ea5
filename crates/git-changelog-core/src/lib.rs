//! git-changelog core - configuration resolution for changelog generation
//!
//! This crate collects defaults, an optional settings file and command-line
//! flags into one validated [`Configuration`], and defines the seams to the
//! changelog engine ([`ChangelogEngine`]) and output sinks ([`SinkWriter`]).

pub mod config;
pub mod engine;
pub mod error;
pub mod sink;

pub use config::{
    load_and_resolve, load_settings, resolve, Configuration, CustomIssue, FlagValues,
    IssueTracker, OutputSink, RangeBound, RangeSelector, Settings, SettingsFile,
};
pub use engine::{ChangelogEngine, SettingsEngine};
pub use error::{ConfigError, Error, OutputError, Result};
pub use sink::{deliver, CapturedSinks, ProcessSinks, SinkWriter};
