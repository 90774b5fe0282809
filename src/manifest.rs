//! Project manifest (`package.json`) discovery and parsing.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Fields read from a `package.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: HashMap<String, String>,
}

impl Manifest {
    /// True when `key` is declared in either dependency table.
    pub fn depends_on(&self, key: &str) -> bool {
        self.dependencies.contains_key(key) || self.dev_dependencies.contains_key(key)
    }
}

/// Outcome of probing a directory for a manifest.
#[derive(Debug, Clone)]
pub enum ManifestProbe {
    /// No `package.json` in the directory, or no directory known.
    Absent,
    /// The file exists but could not be read or parsed. Still counts as a
    /// project marker for report inclusion; it just contributes no metadata.
    Invalid,
    Parsed(Manifest),
}

impl ManifestProbe {
    pub fn file_exists(&self) -> bool {
        !matches!(self, ManifestProbe::Absent)
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        match self {
            ManifestProbe::Parsed(manifest) => Some(manifest),
            _ => None,
        }
    }
}

/// Looks for `package.json` directly under `dir` and parses it.
///
/// Read and parse failures are swallowed; a broken manifest must not abort
/// the scan.
pub fn probe_dir(dir: &str) -> ManifestProbe {
    if dir.is_empty() {
        return ManifestProbe::Absent;
    }
    let path = Path::new(dir).join("package.json");
    if !path.exists() {
        return ManifestProbe::Absent;
    }
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) => {
            log::debug!("failed to read {}: {err}", path.display());
            return ManifestProbe::Invalid;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(manifest) => ManifestProbe::Parsed(manifest),
        Err(err) => {
            log::debug!("failed to parse {}: {err}", path.display());
            ManifestProbe::Invalid
        }
    }
}
