//! The section API as the editor sees it
//!
//! [`crate::client::SectionClient`] implements it over HTTP; tests plug in
//! an in-process store.

use async_trait::async_trait;
use homestretch_core::{HomepageId, SectionId};
use homestretch_sections::{CreateSection, ImageSlot, ReorderEntry, Section, UpdateSection};

use crate::error::ClientError;

/// An image picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Content type guessed from the extension
    pub fn content_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        }
    }
}

/// Remote operations on homepage sections
#[async_trait]
pub trait SectionApi: Send + Sync {
    /// Every section in render order
    async fn list_sections(&self, homepage_id: Option<HomepageId>) -> Result<Vec<Section>, ClientError>;

    async fn list_by_type(&self, section_type: &str) -> Result<Vec<Section>, ClientError>;

    async fn get_section(&self, id: SectionId) -> Result<Section, ClientError>;

    async fn get_hero(&self) -> Result<Section, ClientError>;

    async fn create_section(&self, input: &CreateSection) -> Result<Section, ClientError>;

    async fn update_section(&self, id: SectionId, patch: &UpdateSection) -> Result<Section, ClientError>;

    async fn update_hero(&self, patch: &UpdateSection) -> Result<Section, ClientError>;

    /// One bulk call; the server applies all entries or none
    async fn reorder_sections(&self, entries: &[ReorderEntry]) -> Result<(), ClientError>;

    async fn delete_section(&self, id: SectionId) -> Result<(), ClientError>;

    async fn upload_image(
        &self,
        id: SectionId,
        slot: ImageSlot,
        image: ImageFile,
    ) -> Result<Section, ClientError>;
}
