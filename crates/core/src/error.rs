//! `SiteError`, shared by the section model, the store and the renderer
//!
//! Variants fall into four groups that callers branch on: rejected input,
//! missing records, stale writes, and storage or configuration failures.
//! The server maps each group to one HTTP status.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SiteError {
    // ========================================================================
    // Rejected input
    // ========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    /// One named field is wrong; the editor shows it next to that input
    #[error("Field validation failed for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// `sectionData` does not fit the schema of its component
    #[error("Invalid data for component '{component}': {message}")]
    InvalidSectionData { component: String, message: String },

    /// A reorder list was refused; nothing was applied
    #[error("Invalid reorder request: {0}")]
    InvalidReorder(String),

    // ========================================================================
    // Missing records
    // ========================================================================
    #[error("Section not found: {0}")]
    SectionNotFound(Uuid),

    #[error("Hero section not found")]
    HeroNotFound,

    #[error("Data file not found at path: {0}")]
    DataFileNotFound(PathBuf),

    // ========================================================================
    // Stale writes
    // ========================================================================
    /// `expectedVersion` did not match the stored record
    #[error("Section {id} was modified concurrently: expected version {expected}, found {found}")]
    VersionConflict { id: Uuid, expected: u64, found: u64 },

    // ========================================================================
    // Storage and configuration
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// The data file was written by a newer build
    #[error("Schema version mismatch: expected at most {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SiteError {
    pub fn validation(msg: impl Into<String>) -> Self {
        SiteError::Validation(msg.into())
    }

    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        SiteError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    pub fn invalid_data(component: impl Into<String>, msg: impl Into<String>) -> Self {
        SiteError::InvalidSectionData {
            component: component.into(),
            message: msg.into(),
        }
    }

    pub fn invalid_reorder(msg: impl Into<String>) -> Self {
        SiteError::InvalidReorder(msg.into())
    }

    /// Input the caller can fix (422 over HTTP)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SiteError::Validation(_)
                | SiteError::FieldValidation { .. }
                | SiteError::InvalidSectionData { .. }
                | SiteError::InvalidReorder(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SiteError::SectionNotFound(_) | SiteError::HeroNotFound | SiteError::DataFileNotFound(_)
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, SiteError::VersionConflict { .. })
    }

    /// Failures of the data file or its directory
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            SiteError::Io(_)
                | SiteError::FileRead { .. }
                | SiteError::FileWrite { .. }
                | SiteError::DirectoryCreate { .. }
        )
    }
}

pub type SiteResult<T> = Result<T, SiteError>;

// ============================================================================
// Tests
// ============================================================================
