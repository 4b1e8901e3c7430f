//! Configuration loaded from `octants.json`
//!
//! Every field has a default, so a partial file (or none at all) is fine.
//! Command-line flags override whatever is loaded here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::celestial::{RegionFileBuilder, DEFAULT_PROVENANCE};
use crate::core::error::{AtlasError, InputRole, Result};
use crate::core::models::ORIGIN_STAR_ID;
use crate::core::store::load_json;

/// Config file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "octants.json";

/// Paths and naming options for a run
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Real star catalog (JSON rows)
    pub catalog: PathBuf,
    /// Fictional/overlay catalog, needed for overlap detection and enrichment
    pub fictional_catalog: Option<PathBuf>,
    /// Region-definition document, rewritten by naming
    pub regions: PathBuf,
    /// Nation directory used for enrichment
    pub nations: Option<PathBuf>,
    /// Directory receiving one file per region
    pub output_dir: PathBuf,
    /// Id of the origin star, never chosen as a representative
    pub origin_star_id: i64,
    /// Provenance label written into region files
    pub provenance: String,
    pub file_extension: String,
    pub file_separator: char,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("stars.json"),
            fictional_catalog: None,
            regions: PathBuf::from("regions.json"),
            nations: None,
            output_dir: PathBuf::from("regions"),
            origin_star_id: ORIGIN_STAR_ID,
            provenance: DEFAULT_PROVENANCE.to_string(),
            file_extension: "json".to_string(),
            file_separator: '_',
        }
    }
}

impl AtlasConfig {
    /// Load config from `explicit` if given (it must exist), otherwise from
    /// `octants.json` in `dir` if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let config: AtlasConfig = match explicit {
            Some(path) => load_json(path, InputRole::Config)?,
            None => {
                let fallback = dir.join(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    load_json(&fallback, InputRole::Config)?
                } else {
                    AtlasConfig::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_separator.is_whitespace() || matches!(self.file_separator, '/' | '\\') {
            return Err(AtlasError::invalid_config(format!(
                "file_separator {:?} cannot be used in file names",
                self.file_separator
            )));
        }
        if self.file_extension.trim_start_matches('.').is_empty() {
            return Err(AtlasError::invalid_config("file_extension must not be empty"));
        }
        Ok(())
    }

    /// A region file builder stamped with the current time.
    pub fn region_file_builder(&self) -> RegionFileBuilder {
        RegionFileBuilder::new(self.provenance.clone())
            .with_separator(self.file_separator)
            .with_extension(self.file_extension.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = AtlasConfig::load(None, dir.path()).unwrap();
        assert_eq!(config, AtlasConfig::default());
        assert_eq!(config.origin_star_id, 0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{"catalog": "hyg.json", "provenance": "HYG v3"}"#,
        )
        .unwrap();
        let config = AtlasConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.catalog, PathBuf::from("hyg.json"));
        assert_eq!(config.provenance, "HYG v3");
        assert_eq!(config.regions, PathBuf::from("regions.json"));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let err = AtlasConfig::load(Some(&path), dir.path()).unwrap_err();
        assert_eq!(err.input_role(), Some(InputRole::Config));
    }

    #[test]
    fn test_rejects_path_separator() {
        let config = AtlasConfig {
            file_separator: '/',
            ..AtlasConfig::default()
        };
        assert!(matches!(config.validate(), Err(AtlasError::InvalidConfig { .. })));
    }
}
