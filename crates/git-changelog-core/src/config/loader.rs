//! Settings file loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::types::SettingsOverlay;

/// A parsed settings document together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    /// Path the document was read from
    pub path: PathBuf,
    /// Values present in the document
    pub overlay: SettingsOverlay,
}

/// Settings document format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Yaml,
    Toml,
}

impl SettingsFormat {
    /// `.toml` and `.yaml`/`.yml` are recognised; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Self::Toml,
            "yaml" | "yml" => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load a settings document from a file
pub fn load_settings(path: &Path) -> Result<SettingsFile> {
    let format = SettingsFormat::from_path(path);
    info!(path = %path.display(), ?format, "loading settings file");

    let content =
        std::fs::read_to_string(path).map_err(|source| ConfigError::SettingsFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let overlay = parse_settings(&content, format, path)?;
    debug!(
        path = %path.display(),
        custom_issues = overlay.custom_issues.len(),
        "settings file parsed"
    );

    Ok(SettingsFile {
        path: path.to_path_buf(),
        overlay,
    })
}

/// Parse settings document content in the given format.
///
/// `path` is only used in error messages.
pub fn parse_settings(content: &str, format: SettingsFormat, path: &Path) -> Result<SettingsOverlay> {
    let overlay = match format {
        SettingsFormat::Json => {
            serde_json::from_str(content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        SettingsFormat::Yaml => {
            // An empty YAML document is an empty overlay, not an error
            if content.trim().is_empty() {
                SettingsOverlay::default()
            } else {
                serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
        }
        SettingsFormat::Toml => toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?,
    };
    Ok(overlay)
}
