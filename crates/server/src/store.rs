//! Section store
//!
//! Holds every section in memory behind one async `RwLock` and mirrors the
//! list to the JSON data file. A mutation works on a copy of the list,
//! validates it, writes the file and only then swaps the copy in, so a
//! failed write or a rejected request leaves both memory and disk as they
//! were. Readers never observe a half-applied change.

use homestretch_core::{
    HomepageId, MAIN_HOMEPAGE, SectionId, SiteError, SiteResult, Validatable, Versioned,
};
use homestretch_sections::ordering::apply_reorder;
use homestretch_sections::validation::validate_reorder;
use homestretch_sections::{
    CreateSection, ImageSlot, ReorderEntry, Section, UpdateSection, backup_data_file,
    default_homepage, load_sections, next_order, save_sections, sort_sections,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// SectionStore
// ============================================================================

/// Shared handle to the section collection; clones share state
#[derive(Debug, Clone)]
pub struct SectionStore {
    inner: Arc<RwLock<StoreState>>,
}

#[derive(Debug)]
struct StoreState {
    sections: Vec<Section>,
    path: Option<PathBuf>,
    backed_up: bool,
}

impl StoreState {
    fn find(&self, id: SectionId) -> SiteResult<&Section> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .ok_or(SiteError::SectionNotFound(id))
    }

    fn hero(&self, homepage_id: HomepageId) -> SiteResult<&Section> {
        // sections are kept sorted, so the first hero is the one rendered
        self.sections
            .iter()
            .find(|s| s.homepage_id == homepage_id && s.is_hero())
            .ok_or(SiteError::HeroNotFound)
    }

    /// Persist `next` and make it current
    fn commit(&mut self, mut next: Vec<Section>) -> SiteResult<()> {
        sort_sections(&mut next);

        if let Some(path) = &self.path {
            if !self.backed_up {
                if let Some(backup) = backup_data_file(path)? {
                    tracing::info!(backup = %backup.display(), "data file backed up");
                }
                self.backed_up = true;
            }
            save_sections(path, &next).inspect_err(|e| {
                tracing::error!(path = %path.display(), error = %e, "failed to persist sections");
            })?;
        }

        self.sections = next;
        Ok(())
    }

    /// Replace one section through `update`, committing the result
    fn replace(
        &mut self,
        id: SectionId,
        update: impl FnOnce(&Section) -> SiteResult<Section>,
    ) -> SiteResult<Section> {
        let current = self.find(id)?;
        let updated = update(current)?;
        updated.validate()?;

        let next = self
            .sections
            .iter()
            .map(|s| if s.id == id { updated.clone() } else { s.clone() })
            .collect();
        self.commit(next)?;
        Ok(updated)
    }
}

impl SectionStore {
    /// Store that never touches the disk
    pub fn in_memory(mut sections: Vec<Section>) -> Self {
        sort_sections(&mut sections);
        Self::from_state(StoreState {
            sections,
            path: None,
            backed_up: true,
        })
    }

    /// Store backed by `path`; a missing file starts an empty store
    pub fn open(path: impl AsRef<Path>) -> SiteResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut sections = match load_sections(&path) {
            Ok(sections) => sections,
            Err(SiteError::DataFileNotFound(_)) => {
                tracing::info!(path = %path.display(), "no data file yet, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        sort_sections(&mut sections);
        tracing::info!(path = %path.display(), count = sections.len(), "section store opened");

        Ok(Self::from_state(StoreState {
            sections,
            path: Some(path),
            backed_up: false,
        }))
    }

    fn from_state(state: StoreState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Seed the default homepage when the store holds nothing
    ///
    /// Returns whether anything was written.
    pub async fn seed_if_empty(&self, homepage_id: HomepageId) -> SiteResult<bool> {
        let mut state = self.inner.write().await;
        if !state.sections.is_empty() {
            return Ok(false);
        }

        let defaults = default_homepage(homepage_id);
        tracing::info!(count = defaults.len(), "seeding default homepage sections");
        state.commit(defaults)?;
        Ok(true)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.sections.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// All sections in render order, optionally for one homepage only
    pub async fn list(&self, homepage_id: Option<HomepageId>) -> Vec<Section> {
        let state = self.inner.read().await;
        state
            .sections
            .iter()
            .filter(|s| homepage_id.is_none_or(|id| s.homepage_id == id))
            .cloned()
            .collect()
    }

    /// Sections carrying the `type` tag, in render order
    pub async fn list_by_type(
        &self,
        section_type: &str,
        homepage_id: Option<HomepageId>,
    ) -> Vec<Section> {
        let mut sections = self.list(homepage_id).await;
        sections.retain(|s| s.section_type == section_type);
        sections
    }

    pub async fn get(&self, id: SectionId) -> SiteResult<Section> {
        self.inner.read().await.find(id).cloned()
    }

    /// First hero section of the homepage by render order
    pub async fn hero(&self, homepage_id: HomepageId) -> SiteResult<Section> {
        self.inner.read().await.hero(homepage_id).cloned()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a section; the store assigns the id and, if missing, the order
    pub async fn create(&self, input: CreateSection) -> SiteResult<Section> {
        input.validate()?;

        let mut state = self.inner.write().await;
        let homepage_id = input.homepage_id.unwrap_or(MAIN_HOMEPAGE);
        let order = next_order(state.sections.iter().filter(|s| s.homepage_id == homepage_id));

        let section = input.into_section(order)?;
        section.validate()?;

        let mut next = state.sections.clone();
        next.push(section.clone());
        state.commit(next)?;

        tracing::info!(section_id = %section.id, component = %section.component(), "section created");
        Ok(section)
    }

    /// Partial update of one section
    pub async fn update(&self, id: SectionId, patch: UpdateSection) -> SiteResult<Section> {
        patch.validate()?;

        let mut state = self.inner.write().await;
        let updated = state.replace(id, |current| patch.apply(current))?;

        tracing::info!(section_id = %id, version = updated.version, "section updated");
        Ok(updated)
    }

    /// Partial update of the homepage's hero section
    pub async fn update_hero(
        &self,
        homepage_id: HomepageId,
        patch: UpdateSection,
    ) -> SiteResult<Section> {
        patch.validate()?;

        let mut state = self.inner.write().await;
        let id = state.hero(homepage_id)?.id;
        let updated = state.replace(id, |current| patch.apply(current))?;

        tracing::info!(section_id = %id, "hero section updated");
        Ok(updated)
    }

    /// Apply every entry or none
    pub async fn reorder(&self, entries: &[ReorderEntry]) -> SiteResult<()> {
        validate_reorder(entries)?;

        let mut state = self.inner.write().await;
        if let Some(unknown) = entries.iter().find(|e| state.find(e.id).is_err()) {
            return Err(SiteError::invalid_reorder(format!(
                "unknown section {}",
                unknown.id
            )));
        }

        let mut next = apply_reorder(&state.sections, entries)?;
        for section in next.iter_mut() {
            if entries.iter().any(|e| e.id == section.id) {
                section.bump();
            }
        }
        state.commit(next)?;

        tracing::info!(count = entries.len(), "sections reordered");
        Ok(())
    }

    pub async fn delete(&self, id: SectionId) -> SiteResult<()> {
        let mut state = self.inner.write().await;
        state.find(id)?;

        let next = state.sections.iter().filter(|s| s.id != id).cloned().collect();
        state.commit(next)?;

        tracing::info!(section_id = %id, "section deleted");
        Ok(())
    }

    /// Point the slot's image field of a section at `url`
    pub async fn attach_image(
        &self,
        id: SectionId,
        slot: ImageSlot,
        url: &str,
    ) -> SiteResult<Section> {
        let mut state = self.inner.write().await;
        let updated = state.replace(id, |current| {
            let mut next = current.clone();
            slot.assign(&mut next.data, url)?;
            next.bump();
            Ok(next)
        })?;

        tracing::info!(section_id = %id, ?slot, url, "section image attached");
        Ok(updated)
    }

    /// Check that the slot can be written on the section before an upload is
    /// stored
    pub async fn check_image_slot(&self, id: SectionId, slot: ImageSlot) -> SiteResult<()> {
        let state = self.inner.read().await;
        let mut scratch = state.find(id)?.data.clone();
        slot.assign(&mut scratch, "")
    }
}

// ============================================================================
// Tests
// ============================================================================
