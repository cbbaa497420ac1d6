//! Behaviour shared by stored records

use crate::error::{SiteError, SiteResult};
use crate::types::Timestamp;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

// ============================================================================
// Validatable
// ============================================================================

/// Local consistency checks, run before anything is stored or sent
///
/// ```rust,ignore
/// impl Validatable for Banner {
///     fn validate(&self) -> SiteResult<()> {
///         if self.title.trim().is_empty() {
///             return Err(SiteError::field_validation("title", "must not be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    fn validate(&self) -> SiteResult<()>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Versioned
// ============================================================================

/// A record written under optimistic concurrency
///
/// Every stored mutation bumps the version. A writer that names the version
/// it edited is refused once somebody else has written in between; a writer
/// that names none always wins.
pub trait Versioned {
    fn record_id(&self) -> Uuid;

    fn version(&self) -> u64;

    fn updated_at(&self) -> Timestamp;

    /// Record one stored mutation
    fn bump(&mut self);

    fn check_version(&self, expected: Option<u64>) -> SiteResult<()> {
        match expected {
            Some(expected) if expected != self.version() => Err(SiteError::VersionConflict {
                id: self.record_id(),
                expected,
                found: self.version(),
            }),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// JsonDocument
// ============================================================================

/// A JSON document on disk that records its own schema version
pub trait JsonDocument: Serialize + DeserializeOwned {
    /// Newest schema this build reads and writes
    const SCHEMA_VERSION: u32;

    /// Schema version stored in this document
    fn schema_version(&self) -> u32;

    fn to_json(&self) -> SiteResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    fn from_json(json: &str) -> SiteResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Refuse documents written by a newer build
    fn check_schema(&self) -> SiteResult<()> {
        if self.schema_version() > Self::SCHEMA_VERSION {
            return Err(SiteError::SchemaVersionMismatch {
                expected: Self::SCHEMA_VERSION,
                found: self.schema_version(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
