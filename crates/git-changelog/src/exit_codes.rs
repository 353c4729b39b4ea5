//! Exit codes for the CLI

/// Success, including `--help` and `--version`
pub const SUCCESS: i32 = 0;

/// Argument, configuration, settings file or output error
pub const ERROR: i32 = 1;
