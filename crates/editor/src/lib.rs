//! # Homestretch Editor
//!
//! Admin-side access to the homepage sections.
//!
//! - **SectionApi**: the section endpoints as a trait, so the editor can run
//!   against the HTTP client or anything else that speaks the same calls
//! - **SectionClient**: the `reqwest` implementation with bearer auth
//! - **TokenStore**: the admin token on disk between sessions
//! - **SectionEditor**: the card list with optimistic toggle, move and
//!   remove, drafts for field edits, and notifications for failures
//!

pub mod api;
pub mod client;
pub mod editor;
pub mod error;
pub mod token;

pub use api::{ImageFile, SectionApi};
pub use client::{DEFAULT_API_URL, DEFAULT_TIMEOUT, SectionClient};
pub use editor::{
    CardPhase, Draft, Notification, NotificationLevel, RemoveTicket, ReorderTicket, SaveTicket,
    SectionCard, SectionEditor, ToggleTicket,
};
pub use error::{ApiErrorBody, ClientError, EditorError};
pub use token::TokenStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
