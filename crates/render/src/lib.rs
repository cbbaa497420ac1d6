//! # Homestretch Render
//!
//! The section registry and the homepage renderer.
//!
//! - **SectionRegistry**: immutable `component name -> kind` table; unknown
//!   names resolve to a placeholder instead of failing
//! - **plan**: sorts, filters for the render mode and resolves components
//! - **components**: Dioxus components for the chrome and every section kind
//! - **HomepageRenderer**: draws a plan into an HTML document with
//!   `dioxus-ssr`, for both the public page and the admin preview
//!

pub mod components;
pub mod page;
pub mod plan;
pub mod registry;

pub use components::{NavLink, SiteChrome};
pub use page::HomepageRenderer;
pub use plan::{PlannedContent, PlannedSection, RenderMode, plan};
pub use registry::{Resolution, SectionRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
