//! # Homestretch Core
//!
//! Core types, traits, and error handling for Homestretch.
//!
//! This crate provides the foundational building blocks shared by the
//! section model, the renderer, the REST service and the admin editor:
//!
//! - **Types**: identifiers, the `SectionOrder` rank, timestamps
//! - **Traits**: common behaviors `Validatable`, `Versioned` and `JsonDocument`
//! - **Errors**: unified error handling with `SiteError` and `SiteResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{SiteError, SiteResult};
pub use traits::{JsonDocument, Validatable, Versioned};
pub use types::{HomepageId, MAIN_HOMEPAGE, SectionId, SectionOrder, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
