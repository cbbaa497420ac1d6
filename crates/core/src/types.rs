//! Core types used throughout Homestretch
//!
//! Identifiers, timestamps and the `SectionOrder` rank that defines the
//! top-to-bottom sequence of homepage sections.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Type alias for section unique identifiers
pub type SectionId = uuid::Uuid;

/// Type alias for homepage identifiers
pub type HomepageId = uuid::Uuid;

/// The single homepage the site serves today
pub const MAIN_HOMEPAGE: HomepageId = uuid::Uuid::from_u128(1);

/// Timestamp type used for `createdAt` / `updatedAt`
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ============================================================================
// Section Order
// ============================================================================

/// Render rank of a section. Lower ranks render first.
///
/// Integers and floats are both accepted on the wire. Comparison uses
/// `f64::total_cmp`, so the type is totally ordered; non-finite values are
/// rejected by validation before they reach storage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionOrder(pub f64);

impl SectionOrder {
    /// Create a new rank
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Rank of the first section on an empty page
    pub fn first() -> Self {
        Self(1.0)
    }

    /// Raw value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether the rank can be stored (not NaN or infinite)
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// The rank directly after this one (`floor(self) + 1`)
    pub fn next(&self) -> Self {
        Self(self.0.floor() + 1.0)
    }

    /// Contiguous ranks `1..=len` for a list in display order
    pub fn sequence(len: usize) -> impl Iterator<Item = SectionOrder> {
        (1..=len).map(|i| SectionOrder(i as f64))
    }
}

impl PartialEq for SectionOrder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SectionOrder {}

impl PartialOrd for SectionOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SectionOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<i64> for SectionOrder {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl From<i32> for SectionOrder {
    fn from(value: i32) -> Self {
        Self(value as f64)
    }
}

impl From<f64> for SectionOrder {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SectionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.is_finite() {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
