//! Settings infrastructure for metricsql-lsp.
//!
//! Loads `metricsql.toml` files that tune how optional arguments are counted
//! and what completion offers.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::OptionalArgs;

/// File name searched for during discovery.
pub const SETTINGS_FILE: &str = "metricsql.toml";

/// Root settings structure loaded from metricsql.toml.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Settings {
    /// Signature interpretation.
    pub signatures: Option<SignatureSettings>,

    /// Completion behavior.
    pub completion: Option<CompletionSettings>,
}

/// The `[signatures]` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SignatureSettings {
    /// "trailing-declared" (default) or "appended".
    pub optional_args: Option<OptionalArgs>,
}

/// The `[completion]` table.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CompletionSettings {
    /// Offer functions whose argument types are not modeled (default: true).
    pub include_bypassed: Option<bool>,

    /// Offer aggregation, modifier and logic keywords (default: true).
    pub keywords: Option<bool>,
}

impl Settings {
    /// How optional trailing arguments are counted.
    ///
    /// Defaults to [`OptionalArgs::TrailingDeclared`] when unset.
    pub fn optional_args(&self) -> OptionalArgs {
        self.signatures
            .as_ref()
            .and_then(|s| s.optional_args)
            .unwrap_or_default()
    }

    /// Whether completion offers functions without modeled types.
    pub fn include_bypassed(&self) -> bool {
        self.completion
            .as_ref()
            .and_then(|c| c.include_bypassed)
            .unwrap_or(true)
    }

    /// Whether completion offers keywords from the highlight table.
    pub fn complete_keywords(&self) -> bool {
        self.completion
            .as_ref()
            .and_then(|c| c.keywords)
            .unwrap_or(true)
    }
}

/// Errors from reading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not valid TOML or has an unknown value.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a settings file.
///
/// Unlike [`load_settings`], a missing or malformed file is an error.
pub fn try_load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings from a metricsql.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match try_load_settings(path) {
        Ok(settings) => {
            debug!(path = %path.display(), "loaded settings");
            settings
        }
        Err(SettingsError::Io { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Settings::default()
        }
        Err(e) => {
            warn!("{e}; using default settings");
            Settings::default()
        }
    }
}

/// Discover metricsql.toml by searching up the directory tree, then direct children.
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// holding the file found. If none is found, returns `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    if let Ok(entries) = std::fs::read_dir(start_dir) {
        let mut dirs: Vec<PathBuf> = entries
            .flatten()
            .filter(|e| e.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
            .map(|e| e.path())
            .collect();
        // read_dir order is platform dependent
        dirs.sort();
        for dir in dirs {
            let candidate = dir.join(SETTINGS_FILE);
            if candidate.is_file() {
                return (load_settings(&candidate), dir);
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}
