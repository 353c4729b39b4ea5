//! Output sinks
//!
//! Rendered output is written through a [`SinkWriter`] so callers decide
//! where it really goes. The binary uses [`ProcessSinks`]; tests capture
//! output with [`CapturedSinks`].

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::config::OutputSink;
use crate::error::{OutputError, Result};

/// Destination-specific writes for rendered output
pub trait SinkWriter {
    /// Write to standard output
    fn write_stdout(&mut self, content: &str) -> std::io::Result<()>;

    /// Write (overwrite) a file
    fn write_file(&mut self, path: &Path, content: &str) -> std::io::Result<()>;
}

/// Writes to the real process stdout and filesystem
#[derive(Debug, Default)]
pub struct ProcessSinks;

impl SinkWriter for ProcessSinks {
    fn write_stdout(&mut self, content: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", content)?;
        stdout.flush()
    }

    fn write_file(&mut self, path: &Path, content: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }
}

/// Keeps everything in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedSinks {
    /// Everything written to stdout, in order
    pub stdout: Vec<String>,
    /// Last content written to each file
    pub files: BTreeMap<PathBuf, String>,
}

impl CapturedSinks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SinkWriter for CapturedSinks {
    fn write_stdout(&mut self, content: &str) -> std::io::Result<()> {
        self.stdout.push(content.to_string());
        Ok(())
    }

    fn write_file(&mut self, path: &Path, content: &str) -> std::io::Result<()> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// Write `rendered` to every sink, one after the other.
///
/// Stops at the first failure; sinks already written are left as they are.
#[instrument(skip(rendered, writer), fields(len = rendered.len()))]
pub fn deliver(rendered: &str, sinks: &[OutputSink], writer: &mut dyn SinkWriter) -> Result<()> {
    for sink in sinks {
        debug!(%sink, "writing output");
        let written = match sink {
            OutputSink::Stdout => writer.write_stdout(rendered),
            OutputSink::File(path) => writer.write_file(path, rendered),
        };
        written.map_err(|source| OutputError::WriteFailed {
            sink: sink.to_string(),
            source,
        })?;
    }
    info!(sinks = sinks.len(), "output delivered");
    Ok(())
}
