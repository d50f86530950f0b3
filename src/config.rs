//! Configuration document loading.
//!
//! The tool is driven by a single JSON document, [`CONFIG_FILE`], read from
//! the working directory. Two shapes are accepted:
//!
//! - the current two-section shape: `{"dotfiles": {..}, "packages":
//!   {"official": [..], "aur": [..]}}`
//! - the legacy flat shape: a plain string→string object holding only the
//!   dotfile mapping
//!
//! Parsing is all-or-nothing per shape: the strict shape is tried first and
//! the legacy shape only when it fails. Legacy documents yield an empty
//! package declaration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Well-known configuration file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "dotfiles.json";

/// Declared packages, split by repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageSet {
    /// Packages known to exist in the official repositories.
    #[serde(default)]
    pub official: Vec<String>,
    /// Packages assumed to require the AUR.
    #[serde(default)]
    pub aur: Vec<String>,
}

impl PackageSet {
    /// The authoritative installation worklist: official names followed by
    /// AUR names, in declaration order. Duplicates are preserved — a name
    /// listed twice is installed twice (the backends tolerate this via
    /// `--needed`).
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        self.official.iter().chain(&self.aur).cloned().collect()
    }

    /// Whether no packages are declared at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.official.is_empty() && self.aur.is_empty()
    }
}

/// Parsed configuration: the dotfile mapping plus the package declaration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Relative source path → destination path (relative to the base path).
    pub dotfiles: BTreeMap<String, String>,
    /// Declared packages; empty for legacy documents.
    pub packages: PackageSet,
}

/// The current two-section document shape.
///
/// `dotfiles` is required so that legacy flat documents (which have no such
/// key holding an object) fail this parse and fall through to the legacy
/// branch. Unknown top-level keys are ignored.
#[derive(Debug, Deserialize)]
struct RawConfig {
    dotfiles: BTreeMap<String, String>,
    #[serde(default)]
    packages: PackageSet,
}

/// Load and parse the configuration document at `path`.
///
/// Tries the current two-section shape first, then the legacy flat mapping.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file cannot be read and
/// [`ConfigError::Parse`] (carrying the strict-shape message) if neither
/// shape parses.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    match serde_json::from_str::<RawConfig>(&raw) {
        Ok(parsed) => Ok(Config {
            dotfiles: parsed.dotfiles,
            packages: parsed.packages,
        }),
        Err(strict_err) => {
            // Legacy documents are a flat string→string mapping.
            serde_json::from_str::<BTreeMap<String, String>>(&raw)
                .map(|dotfiles| Config {
                    dotfiles,
                    packages: PackageSet::default(),
                })
                .map_err(|_| ConfigError::Parse {
                    path: path.display().to_string(),
                    message: strict_err.to_string(),
                })
        }
    }
}
