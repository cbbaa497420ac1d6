//! Data file format for the section store
//!
//! Sections are kept in one pretty-printed JSON document:
//!
//! ```json
//! { "schemaVersion": 1, "sections": [ … ] }
//! ```
//!
//! Files written before the wrapper existed (a bare array of sections) are
//! still accepted. Writes go to a temporary file in the same directory that
//! is then renamed over the target, so a crash never leaves a half-written
//! data file behind.

use crate::SCHEMA_VERSION;
use crate::section::Section;
use homestretch_core::{JsonDocument, SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// ============================================================================
// Data File Wrapper
// ============================================================================

/// Wrapper for the data file that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFile {
    /// Schema version for migration purposes
    pub schema_version: u32,

    /// Every stored section, across homepages
    pub sections: Vec<Section>,
}

impl SectionFile {
    /// Create a new data file from a section list
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            sections,
        }
    }
}

impl JsonDocument for SectionFile {
    const SCHEMA_VERSION: u32 = crate::SCHEMA_VERSION;

    fn schema_version(&self) -> u32 {
        self.schema_version
    }
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load all sections from a data file
pub fn load_sections(path: impl AsRef<Path>) -> SiteResult<Vec<Section>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SiteError::DataFileNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| SiteError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_sections_from_str(&json).map_err(|e| match e {
        SiteError::JsonSerialization(je) => SiteError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid data file format: {}", je),
        },
        other => other,
    })
}

/// Load sections from a JSON string (wrapped or bare array)
pub fn load_sections_from_str(json: &str) -> SiteResult<Vec<Section>> {
    if let Ok(file) = SectionFile::from_json(json) {
        file.check_schema()?;
        return Ok(file.sections);
    }

    // Bare array written before the wrapper existed
    let sections: Vec<Section> = serde_json::from_str(json)?;
    Ok(sections)
}

// ============================================================================
// Save Functions
// ============================================================================

/// Atomically replace the data file with the given sections
pub fn save_sections(path: impl AsRef<Path>, sections: &[Section]) -> SiteResult<()> {
    let path = path.as_ref();
    let json = SectionFile::new(sections.to_vec()).to_json()?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.exists() {
        std::fs::create_dir_all(&parent).map_err(|e| SiteError::DirectoryCreate {
            path: parent.clone(),
            message: e.to_string(),
        })?;
    }

    let write_err = |e: std::io::Error| SiteError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut tmp = NamedTempFile::new_in(&parent).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), count = sections.len(), "data file written");
    Ok(())
}

/// Copy the data file to `<name>.backup` before it is first overwritten
pub fn backup_data_file(path: impl AsRef<Path>) -> SiteResult<Option<PathBuf>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let mut backup_name = path.as_os_str().to_owned();
    backup_name.push(".backup");
    let backup_path = PathBuf::from(backup_name);

    std::fs::copy(path, &backup_path).map_err(|e| SiteError::FileWrite {
        path: backup_path.clone(),
        message: format!("Failed to create backup: {}", e),
    })?;

    Ok(Some(backup_path))
}

// ============================================================================
// Tests
// ============================================================================
