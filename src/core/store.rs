//! Catalog and region stores
//!
//! The star catalog and the region document live outside the core. These
//! traits are the seams; the JSON implementations read a document fully,
//! close it, and hand back owned values.
//!
//! Writes go through a sibling temp file and a rename, so an interrupted run
//! never leaves a half-written document behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::{AtlasError, InputRole, Result};
use crate::core::models::{RegionDocument, StarRecord};

#[cfg(test)]
use mockall::automock;

/// Read access to a star catalog
#[cfg_attr(test, automock)]
pub trait StarStore {
    /// Load every star, in catalog order
    fn load_stars(&self) -> Result<Vec<StarRecord>>;
}

/// Read/write access to the region-definition document
#[cfg_attr(test, automock)]
pub trait RegionStore {
    /// Load the document, validating region bounds
    fn load_regions(&self) -> Result<RegionDocument>;

    /// Persist the document, replacing the previous version
    fn save_regions(&self, document: &RegionDocument) -> Result<()>;
}

/// Read and parse a whole JSON document, tagging failures with the input's role.
pub fn load_json<T: DeserializeOwned>(path: &Path, role: InputRole) -> Result<T> {
    let contents =
        fs::read_to_string(path).map_err(|e| AtlasError::missing_input(role, path, e))?;
    serde_json::from_str(&contents).map_err(|e| AtlasError::missing_input(role, path, e))
}

/// Serialize `value` as pretty JSON and replace `path` with it.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');
    write_atomic(path, contents.as_bytes())
}

/// Write `contents` to a temp file beside `path`, then rename it into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| AtlasError::invalid_config(format!("not a file path: {}", path.display())))?;
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    if let Err(e) = fs::write(&tmp_path, contents).and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

// =============================================================================
// JSON Star Store
// =============================================================================

/// A star catalog stored as a JSON array of row objects.
#[derive(Debug, Clone)]
pub struct JsonStarStore {
    path: PathBuf,
    role: InputRole,
}

impl JsonStarStore {
    /// The real-star catalog at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            role: InputRole::StarCatalog,
        }
    }

    /// A fictional/overlay catalog at `path`
    pub fn fictional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            role: InputRole::FictionalCatalog,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StarStore for JsonStarStore {
    fn load_stars(&self) -> Result<Vec<StarRecord>> {
        let stars: Vec<StarRecord> = load_json(&self.path, self.role)?;
        debug!("loaded {} stars from {}", stars.len(), self.path.display());
        Ok(stars)
    }
}

// =============================================================================
// JSON Region Store
// =============================================================================

/// The region document stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonRegionStore {
    path: PathBuf,
}

impl JsonRegionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegionStore for JsonRegionStore {
    fn load_regions(&self) -> Result<RegionDocument> {
        let document: RegionDocument = load_json(&self.path, InputRole::RegionDocument)?;
        document
            .validate()
            .map_err(|e| AtlasError::missing_input(InputRole::RegionDocument, &self.path, e))?;
        debug!(
            "loaded {} regions from {}",
            document.regions.len(),
            self.path.display()
        );
        Ok(document)
    }

    fn save_regions(&self, document: &RegionDocument) -> Result<()> {
        write_json_atomic(&self.path, document)
    }
}
