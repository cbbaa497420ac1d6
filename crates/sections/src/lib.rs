//! # Homestretch Sections
//!
//! The homepage section model.
//!
//! ## Core Concepts
//!
//! - **Section**: one configurable, orderable block of a homepage
//! - **SectionKind**: the closed set of components the site can render
//! - **SectionData**: the typed payload of a section, keyed by its component,
//!   with an explicit `Unknown` variant for components this build lacks
//! - **Ordering**: render order is ascending `order`, ties resolved by
//!   creation time then id
//! - **SectionFile**: the versioned JSON document the store persists
//!

// Module declarations
pub mod data;
pub mod defaults;
pub mod kind;
pub mod ordering;
pub mod section;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use data::{DEFAULT_COUNTDOWN_DATE, SectionData};
pub use defaults::{default_homepage, starter_data};
pub use kind::SectionKind;
pub use ordering::{compare_sections, next_order, plan_move, sort_sections, sorted};
pub use section::{CreateSection, ImageSlot, ReorderEntry, Section, UpdateSection};
pub use serialization::{SectionFile, backup_data_file, load_sections, save_sections};

// Re-export core types that are commonly used with sections
pub use homestretch_core::{
    HomepageId, MAIN_HOMEPAGE, SectionId, SectionOrder, SiteError, SiteResult, Validatable,
    Versioned,
};

/// Current schema version for data files
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
