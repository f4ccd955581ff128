//! Settings file loading.
//!
//! Settings come from an optional `docsn.toml` with a `[docsn]` table:
//!
//! ```toml
//! [docsn]
//! input = "build/docs.json"
//! out-dir = "site/api"
//! toc-file = "modules.json"
//! search-file = "search.json"
//! ```
//!
//! Every key is optional; command-line flags override whatever the file sets.

use std::fs;
use std::path::{Path, PathBuf};

use docsn_core::DEFAULT_TOC_FILE;

/// Settings file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "docsn.toml";

/// Extractor output read when nothing else is configured.
pub const DEFAULT_INPUT: &str = "docs.json";

/// Resolved settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Extractor JSON to read.
    pub input: PathBuf,
    /// Directory receiving the class documents.
    pub out_dir: PathBuf,
    /// Table-of-contents file name inside `out_dir`.
    pub toc_file: String,
    /// Search index file name inside `out_dir`, if it should be written.
    pub search_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from("."),
            toc_file: DEFAULT_TOC_FILE.to_string(),
            search_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from `docsn.toml` in `cwd` if it exists.
    ///
    /// A file named explicitly must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = cwd.join(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults.");
                    return Ok(Self::default());
                }
                default
            }
        };
        let contents = fs::read_to_string(&path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
        tracing::debug!("Loaded settings from {}", path.display());
        Self::from_toml(&contents)
            .map_err(|err| format!("Invalid settings in {}: {err}", path.display()))
    }

    /// Parse settings from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let value: toml::Value = contents
            .parse()
            .map_err(|err| format!("Failed to parse TOML: {err}"))?;

        let mut settings = Self::default();
        let Some(table) = value.get("docsn") else {
            return Ok(settings);
        };

        if let Some(input) = get_string(table, "input")? {
            settings.input = PathBuf::from(input);
        }
        if let Some(out_dir) = get_string(table, "out-dir")? {
            settings.out_dir = PathBuf::from(out_dir);
        }
        if let Some(toc_file) = get_string(table, "toc-file")? {
            settings.toc_file = toc_file;
        }
        settings.search_file = get_string(table, "search-file")?;
        Ok(settings)
    }
}

fn get_string(table: &toml::Value, key: &str) -> Result<Option<String>, String> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| format!("docsn.{key} must be a string")),
    }
}
