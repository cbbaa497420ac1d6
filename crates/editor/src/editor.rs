//! Section editor
//!
//! Holds the admin's working copy of the homepage as a list of cards and
//! keeps it in step with the server.
//!
//! Each card moves through `Viewing -> Editing -> Saving -> Viewing`. Field
//! edits are buffered in a draft while editing; a failed save drops the
//! card back to `Editing` with the draft intact and the error on the card.
//!
//! Toggling, moving and removing are optimistic: the local list changes
//! first and is rolled back to the last confirmed snapshot when the server
//! call fails. Every such operation is split in two. `prepare_*` applies
//! the local change synchronously and returns a ticket; `finish_*` takes
//! the ticket and the server result. The async methods (`toggle`,
//! `move_section`, ...) run both halves around the API call.

use homestretch_core::{HomepageId, MAIN_HOMEPAGE, SectionId, Validatable};
use homestretch_sections::{
    CreateSection, ImageSlot, ReorderEntry, Section, SectionData, SectionKind, UpdateSection,
    compare_sections, plan_move, starter_data,
};
use serde_json::Value;

use crate::api::{ImageFile, SectionApi};
use crate::error::{ClientError, EditorError};

// ============================================================================
// Cards
// ============================================================================

/// Where a card is in its edit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Viewing,
    Editing,
    /// A request for this card is in flight
    Saving,
}

impl CardPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CardPhase::Viewing => "viewing",
            CardPhase::Editing => "editing",
            CardPhase::Saving => "saving",
        }
    }
}

/// Buffered, unsaved field values of a card
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub name: String,
    pub section_type: String,
    pub data: SectionData,
}

impl Draft {
    fn from_section(section: &Section) -> Self {
        Self {
            name: section.name.clone(),
            section_type: section.section_type.clone(),
            data: section.data.clone(),
        }
    }

    /// Update carrying only the fields that differ from `base`
    fn to_update(&self, base: &Section) -> Result<UpdateSection, EditorError> {
        let mut patch = UpdateSection::default();
        if self.name != base.name {
            patch.name = Some(self.name.clone());
        }
        if self.section_type != base.section_type {
            patch.section_type = Some(self.section_type.clone());
        }
        if self.data != base.data {
            patch.section_data = Some(self.data.to_value()?);
        }
        Ok(patch)
    }
}

/// One section as shown in the editor
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCard {
    section: Section,
    confirmed: Section,
    phase: CardPhase,
    draft: Option<Draft>,
    error: Option<String>,
}

impl SectionCard {
    fn new(section: Section) -> Self {
        Self {
            confirmed: section.clone(),
            section,
            phase: CardPhase::Viewing,
            draft: None,
            error: None,
        }
    }

    pub fn id(&self) -> SectionId {
        self.section.id
    }

    /// The section as displayed, including optimistic changes
    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Last state the server confirmed
    pub fn confirmed(&self) -> &Section {
        &self.confirmed
    }

    pub fn phase(&self) -> CardPhase {
        self.phase
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Inline error from the last failed operation on this card
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the draft differs from the section
    pub fn is_dirty(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|draft| *draft != Draft::from_section(&self.section))
    }

    fn confirm(&mut self, section: Section) {
        self.confirmed = section.clone();
        self.section = section;
    }

    fn guard(&self, action: &'static str, allowed: &[CardPhase]) -> Result<(), EditorError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(EditorError::InvalidPhase {
                id: self.id(),
                phase: self.phase.as_str(),
                action,
            })
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A dismissible message for the admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

// ============================================================================
// Tickets
// ============================================================================

/// A save that has been applied locally and awaits the server
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct SaveTicket {
    id: SectionId,
    patch: UpdateSection,
}

impl SaveTicket {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn patch(&self) -> &UpdateSection {
        &self.patch
    }
}

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ToggleTicket {
    id: SectionId,
    resume: CardPhase,
    patch: UpdateSection,
}

impl ToggleTicket {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn patch(&self) -> &UpdateSection {
        &self.patch
    }
}

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ReorderTicket {
    entries: Vec<ReorderEntry>,
}

impl ReorderTicket {
    /// The full contiguous order to send in one reorder call
    pub fn entries(&self) -> &[ReorderEntry] {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct RemoveTicket {
    card: SectionCard,
    index: usize,
}

impl RemoveTicket {
    pub fn id(&self) -> SectionId {
        self.card.id()
    }
}

// ============================================================================
// SectionEditor
// ============================================================================

pub struct SectionEditor<A> {
    api: A,
    homepage_id: HomepageId,
    cards: Vec<SectionCard>,
    reorder_in_flight: bool,
    check_versions: bool,
    notifications: Vec<Notification>,
    next_notification: u64,
    needs_reauth: bool,
}

impl<A: SectionApi> SectionEditor<A> {
    pub fn new(api: A) -> Self {
        Self::for_homepage(api, MAIN_HOMEPAGE)
    }

    pub fn for_homepage(api: A, homepage_id: HomepageId) -> Self {
        Self {
            api,
            homepage_id,
            cards: Vec::new(),
            reorder_in_flight: false,
            check_versions: false,
            notifications: Vec::new(),
            next_notification: 1,
            needs_reauth: false,
        }
    }

    /// Send `expectedVersion` with saves and toggles, turning concurrent
    /// edits into conflicts instead of last-write-wins
    pub fn with_version_check(mut self, enabled: bool) -> Self {
        self.check_versions = enabled;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn homepage_id(&self) -> HomepageId {
        self.homepage_id
    }

    // ========================================================================
    // Reading state
    // ========================================================================

    /// Cards in display order
    pub fn cards(&self) -> &[SectionCard] {
        &self.cards
    }

    pub fn card(&self, id: SectionId) -> Option<&SectionCard> {
        self.cards.iter().find(|card| card.id() == id)
    }

    /// Displayed sections in order, what the live preview renders
    pub fn sections(&self) -> Vec<Section> {
        self.cards.iter().map(|card| card.section.clone()).collect()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Remove one notification; returns whether it existed
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Set once the server rejected the token
    pub fn needs_reauth(&self) -> bool {
        self.needs_reauth
    }

    /// Call after logging in again
    pub fn clear_reauth(&mut self) {
        self.needs_reauth = false;
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Replace every card with the server's list, discarding drafts
    pub async fn load(&mut self) -> Result<(), EditorError> {
        match self.api.list_sections(Some(self.homepage_id)).await {
            Ok(sections) => {
                self.cards = sections.into_iter().map(SectionCard::new).collect();
                self.sort_cards();
                self.reorder_in_flight = false;
                tracing::debug!(count = self.cards.len(), "editor loaded");
                Ok(())
            }
            Err(err) => Err(self.fail(None, err)),
        }
    }

    // ========================================================================
    // Field editing
    // ========================================================================

    /// Open a card for editing; no-op when it already is
    pub fn begin_edit(&mut self, id: SectionId) -> Result<(), EditorError> {
        let card = self.card_mut(id)?;
        card.guard("edit", &[CardPhase::Viewing, CardPhase::Editing])?;
        if card.phase == CardPhase::Viewing {
            card.draft = Some(Draft::from_section(&card.section));
            card.phase = CardPhase::Editing;
            card.error = None;
        }
        Ok(())
    }

    pub fn edit_name(&mut self, id: SectionId, name: impl Into<String>) -> Result<(), EditorError> {
        let name = name.into();
        self.with_draft(id, |draft| {
            draft.name = name;
            Ok(())
        })
    }

    pub fn edit_type(&mut self, id: SectionId, section_type: impl Into<String>) -> Result<(), EditorError> {
        let section_type = section_type.into();
        self.with_draft(id, |draft| {
            draft.section_type = section_type;
            Ok(())
        })
    }

    /// Set one top-level payload field; a value of the wrong type is
    /// recorded on the card and leaves the draft unchanged
    pub fn edit_field(&mut self, id: SectionId, key: &str, value: Value) -> Result<(), EditorError> {
        self.with_draft(id, |draft| {
            draft.data = draft.data.with_field(key, value)?;
            Ok(())
        })
    }

    /// Replace the whole payload
    pub fn replace_data(&mut self, id: SectionId, data: SectionData) -> Result<(), EditorError> {
        self.with_draft(id, |draft| {
            draft.data = data;
            Ok(())
        })
    }

    /// Drop the draft and return to viewing
    pub fn cancel_edit(&mut self, id: SectionId) -> Result<(), EditorError> {
        let card = self.card_mut(id)?;
        card.guard("cancel", &[CardPhase::Viewing, CardPhase::Editing])?;
        card.phase = CardPhase::Viewing;
        card.draft = None;
        card.error = None;
        Ok(())
    }

    fn with_draft(
        &mut self,
        id: SectionId,
        edit: impl FnOnce(&mut Draft) -> Result<(), EditorError>,
    ) -> Result<(), EditorError> {
        let card = self.card_mut(id)?;
        card.guard("edit", &[CardPhase::Editing])?;
        let Some(draft) = card.draft.as_mut() else {
            return Err(EditorError::InvalidPhase {
                id,
                phase: card.phase.as_str(),
                action: "edit",
            });
        };

        let mut next = draft.clone();
        match edit(&mut next) {
            Ok(()) => {
                *draft = next;
                card.error = None;
                Ok(())
            }
            Err(err) => {
                card.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    // ========================================================================
    // Save
    // ========================================================================

    /// Validate the draft and mark the card saving
    ///
    /// Returns `None` when the draft changes nothing; the card simply goes
    /// back to viewing.
    pub fn prepare_save(&mut self, id: SectionId) -> Result<Option<SaveTicket>, EditorError> {
        let check_versions = self.check_versions;
        let card = self.card_mut(id)?;
        card.guard("save", &[CardPhase::Editing])?;

        let draft = card.draft.clone().ok_or(EditorError::InvalidPhase {
            id,
            phase: card.phase.as_str(),
            action: "save",
        })?;

        let mut patch = match draft.to_update(&card.section) {
            Ok(patch) => patch,
            Err(err) => {
                card.error = Some(err.to_string());
                return Err(err);
            }
        };

        if patch.is_empty() {
            card.phase = CardPhase::Viewing;
            card.draft = None;
            card.error = None;
            return Ok(None);
        }

        if let Err(err) = patch.validate() {
            let err = EditorError::from(err);
            card.error = Some(err.to_string());
            return Err(err);
        }

        if check_versions {
            patch.expected_version = Some(card.confirmed.version);
        }
        card.phase = CardPhase::Saving;
        card.error = None;
        Ok(Some(SaveTicket { id, patch }))
    }

    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<Section, ClientError>,
    ) -> Result<Section, EditorError> {
        match result {
            Ok(section) => {
                let card = self.card_mut(ticket.id)?;
                let order = card.section.order;
                card.confirm(section.clone());
                card.section.order = order;
                card.phase = CardPhase::Viewing;
                card.draft = None;
                card.error = None;
                self.sort_cards();
                Ok(section)
            }
            Err(err) => {
                if let Ok(card) = self.card_mut(ticket.id) {
                    card.phase = CardPhase::Editing;
                    card.error = Some(err.user_message());
                }
                Err(self.fail(Some(ticket.id), err))
            }
        }
    }

    /// Save the card's draft
    pub async fn save(&mut self, id: SectionId) -> Result<Section, EditorError> {
        let Some(ticket) = self.prepare_save(id)? else {
            return self
                .card(id)
                .map(|card| card.section.clone())
                .ok_or(EditorError::UnknownSection(id));
        };
        let result = self.api.update_section(ticket.id, &ticket.patch).await;
        self.finish_save(ticket, result)
    }

    // ========================================================================
    // Toggle
    // ========================================================================

    /// Flip `enabled` locally
    pub fn prepare_toggle(&mut self, id: SectionId) -> Result<ToggleTicket, EditorError> {
        let check_versions = self.check_versions;
        let card = self.card_mut(id)?;
        card.guard("toggle", &[CardPhase::Viewing, CardPhase::Editing])?;

        let enabled = !card.section.enabled;
        let mut patch = UpdateSection::enabled(enabled);
        if check_versions {
            patch.expected_version = Some(card.confirmed.version);
        }

        let resume = card.phase;
        card.section.enabled = enabled;
        card.phase = CardPhase::Saving;
        card.error = None;
        Ok(ToggleTicket { id, resume, patch })
    }

    pub fn finish_toggle(
        &mut self,
        ticket: ToggleTicket,
        result: Result<Section, ClientError>,
    ) -> Result<Section, EditorError> {
        let card = self.card_mut(ticket.id)?;
        card.phase = ticket.resume;

        match result {
            Ok(section) => {
                // keep any optimistic order from a reorder still in flight
                let order = card.section.order;
                card.confirm(section.clone());
                card.section.order = order;
                Ok(section)
            }
            Err(err) => {
                card.section.enabled = card.confirmed.enabled;
                card.error = Some(err.user_message());
                Err(self.fail(Some(ticket.id), err))
            }
        }
    }

    /// Enable a disabled section or disable an enabled one
    pub async fn toggle(&mut self, id: SectionId) -> Result<Section, EditorError> {
        let ticket = self.prepare_toggle(id)?;
        let result = self.api.update_section(ticket.id, &ticket.patch).await;
        self.finish_toggle(ticket, result)
    }

    // ========================================================================
    // Reorder
    // ========================================================================

    /// Move a card to `new_index` (0-based, clamped) and renumber all cards
    /// `1..=n`
    pub fn prepare_move(&mut self, id: SectionId, new_index: usize) -> Result<ReorderTicket, EditorError> {
        if self.reorder_in_flight {
            return Err(EditorError::Busy("a reorder is already in progress".to_string()));
        }
        self.card_mut(id)?;

        let entries = plan_move(&self.sections(), id, new_index)?;
        for entry in &entries {
            if let Some(card) = self.cards.iter_mut().find(|c| c.id() == entry.id) {
                card.section.order = entry.order;
            }
        }
        self.sort_cards();
        self.reorder_in_flight = true;

        Ok(ReorderTicket { entries })
    }

    pub fn finish_move(
        &mut self,
        ticket: ReorderTicket,
        result: Result<(), ClientError>,
    ) -> Result<(), EditorError> {
        self.reorder_in_flight = false;

        match result {
            Ok(()) => {
                for entry in &ticket.entries {
                    if let Some(card) = self.cards.iter_mut().find(|c| c.id() == entry.id) {
                        // the server bumps the version of every reordered record
                        card.confirmed.order = entry.order;
                        card.confirmed.version += 1;
                        card.section.order = entry.order;
                        card.section.version = card.confirmed.version;
                    }
                }
                self.sort_cards();
                Ok(())
            }
            Err(err) => {
                for card in self.cards.iter_mut() {
                    card.section.order = card.confirmed.order;
                }
                self.sort_cards();
                Err(self.fail(None, err))
            }
        }
    }

    /// Drag-and-drop: one reorder call for the whole list
    pub async fn move_section(&mut self, id: SectionId, new_index: usize) -> Result<(), EditorError> {
        let ticket = self.prepare_move(id, new_index)?;
        let result = self.api.reorder_sections(&ticket.entries).await;
        self.finish_move(ticket, result)
    }

    // ========================================================================
    // Add / remove
    // ========================================================================

    /// Create a section of `kind` with its starter content at the end
    pub async fn add_section(
        &mut self,
        kind: SectionKind,
        name: impl Into<String>,
        enabled: bool,
    ) -> Result<Section, EditorError> {
        let mut input = CreateSection::for_kind(name, kind).with_data(starter_data(kind).to_value()?);
        input.enabled = Some(enabled);
        input.homepage_id = Some(self.homepage_id);
        input.validate()?;

        match self.api.create_section(&input).await {
            Ok(section) => {
                self.notify(
                    NotificationLevel::Info,
                    format!("Added section '{}'", section.name),
                );
                self.cards.push(SectionCard::new(section.clone()));
                self.sort_cards();
                Ok(section)
            }
            Err(err) => Err(self.fail(None, err)),
        }
    }

    /// Take the card out of the list
    pub fn prepare_remove(&mut self, id: SectionId) -> Result<RemoveTicket, EditorError> {
        let index = self
            .cards
            .iter()
            .position(|card| card.id() == id)
            .ok_or(EditorError::UnknownSection(id))?;
        self.cards[index].guard("remove", &[CardPhase::Viewing, CardPhase::Editing])?;

        let card = self.cards.remove(index);
        Ok(RemoveTicket { card, index })
    }

    pub fn finish_remove(
        &mut self,
        ticket: RemoveTicket,
        result: Result<(), ClientError>,
    ) -> Result<(), EditorError> {
        match result {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => {
                tracing::debug!(section_id = %ticket.id(), "section was already gone");
                Ok(())
            }
            Err(err) => {
                let id = ticket.id();
                let index = ticket.index.min(self.cards.len());
                self.cards.insert(index, ticket.card);
                Err(self.fail(Some(id), err))
            }
        }
    }

    pub async fn remove_section(&mut self, id: SectionId) -> Result<(), EditorError> {
        let ticket = self.prepare_remove(id)?;
        let result = self.api.delete_section(ticket.id()).await;
        self.finish_remove(ticket, result)
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    /// Upload an image into the slot and adopt the updated section
    ///
    /// If the card is being edited the new URL is copied into the draft as
    /// well, so saving the draft does not undo the upload.
    pub async fn upload_image(
        &mut self,
        id: SectionId,
        slot: ImageSlot,
        image: ImageFile,
    ) -> Result<Section, EditorError> {
        let card = self.card_mut(id)?;
        card.guard("upload", &[CardPhase::Viewing, CardPhase::Editing])?;

        let mut scratch = card.section.data.clone();
        if let Err(err) = slot.assign(&mut scratch, "") {
            let err = EditorError::from(err);
            card.error = Some(err.to_string());
            return Err(err);
        }

        let resume = card.phase;
        card.phase = CardPhase::Saving;

        let result = self.api.upload_image(id, slot, image).await;

        let card = self.card_mut(id)?;
        card.phase = resume;
        match result {
            Ok(section) => {
                if let (Some(draft), Some(url)) = (card.draft.as_mut(), image_url(slot, &section.data)) {
                    slot.assign(&mut draft.data, url)?;
                }
                let order = card.section.order;
                card.confirm(section.clone());
                card.section.order = order;
                card.error = None;
                Ok(section)
            }
            Err(err) => {
                card.error = Some(err.user_message());
                Err(self.fail(Some(id), err))
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn card_mut(&mut self, id: SectionId) -> Result<&mut SectionCard, EditorError> {
        self.cards
            .iter_mut()
            .find(|card| card.id() == id)
            .ok_or(EditorError::UnknownSection(id))
    }

    fn sort_cards(&mut self) {
        self.cards
            .sort_by(|a, b| compare_sections(&a.section, &b.section));
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        let id = self.next_notification;
        self.next_notification += 1;
        self.notifications.push(Notification {
            id,
            level,
            message: message.into(),
        });
        id
    }

    /// Record a failed request: raise the re-auth flag on 401 and queue a
    /// notification unless the error is a validation message already shown
    /// on the card
    fn fail(&mut self, id: Option<SectionId>, err: ClientError) -> EditorError {
        tracing::warn!(section_id = ?id, error = %err, "section request failed");

        if err.is_unauthorized() {
            self.needs_reauth = true;
        }
        if !(err.is_validation() && id.is_some()) {
            self.notify(NotificationLevel::Error, err.user_message());
        }
        EditorError::Client(err)
    }
}

/// URL stored in the slot's field, if any
fn image_url(slot: ImageSlot, data: &SectionData) -> Option<String> {
    match (slot, data) {
        (ImageSlot::Hero, SectionData::Hero(hero)) => hero.background_image.clone(),
        (ImageSlot::Story, SectionData::Story(story)) => story.image.clone(),
        (ImageSlot::Story, SectionData::About(about)) => about.image.clone(),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use homestretch_sections::data::HeroData;
    use homestretch_server::SectionStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    /// API backed by an in-memory store, with one-shot failure injection
    struct StoreApi {
        store: SectionStore,
        failure: Mutex<Option<ClientError>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl StoreApi {
        fn new(sections: Vec<Section>) -> Self {
            Self {
                store: SectionStore::in_memory(sections),
                failure: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn fail_next(&self, err: ClientError) {
            *self.failure.lock().unwrap() = Some(err);
        }

        fn count(&self, call: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
        }

        fn enter(&self, call: &'static str) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(call);
            match self.failure.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl SectionApi for StoreApi {
        async fn list_sections(&self, homepage_id: Option<HomepageId>) -> Result<Vec<Section>, ClientError> {
            self.enter("list")?;
            Ok(self.store.list(homepage_id).await)
        }

        async fn list_by_type(&self, section_type: &str) -> Result<Vec<Section>, ClientError> {
            self.enter("list_by_type")?;
            Ok(self.store.list_by_type(section_type, None).await)
        }

        async fn get_section(&self, id: SectionId) -> Result<Section, ClientError> {
            self.enter("get")?;
            Ok(self.store.get(id).await?)
        }

        async fn get_hero(&self) -> Result<Section, ClientError> {
            self.enter("hero")?;
            Ok(self.store.hero(MAIN_HOMEPAGE).await?)
        }

        async fn create_section(&self, input: &CreateSection) -> Result<Section, ClientError> {
            self.enter("create")?;
            Ok(self.store.create(input.clone()).await?)
        }

        async fn update_section(&self, id: SectionId, patch: &UpdateSection) -> Result<Section, ClientError> {
            self.enter("update")?;
            Ok(self.store.update(id, patch.clone()).await?)
        }

        async fn update_hero(&self, patch: &UpdateSection) -> Result<Section, ClientError> {
            self.enter("update_hero")?;
            Ok(self.store.update_hero(MAIN_HOMEPAGE, patch.clone()).await?)
        }

        async fn reorder_sections(&self, entries: &[ReorderEntry]) -> Result<(), ClientError> {
            self.enter("reorder")?;
            Ok(self.store.reorder(entries).await?)
        }

        async fn delete_section(&self, id: SectionId) -> Result<(), ClientError> {
            self.enter("delete")?;
            Ok(self.store.delete(id).await?)
        }

        async fn upload_image(&self, id: SectionId, slot: ImageSlot, image: ImageFile) -> Result<Section, ClientError> {
            self.enter("upload")?;
            let url = format!("/uploads/{}", image.file_name);
            Ok(self.store.attach_image(id, slot, &url).await?)
        }
    }

    fn section(name: &str, order: i64) -> Section {
        Section::new(name, SectionKind::About, order.into())
    }

    fn abc() -> (Section, Section, Section) {
        (section("a", 1), section("b", 2), section("c", 3))
    }

    async fn editor_with(sections: Vec<Section>) -> SectionEditor<StoreApi> {
        let mut editor = SectionEditor::new(StoreApi::new(sections));
        editor.load().await.unwrap();
        editor
    }

    fn names<A: SectionApi>(editor: &SectionEditor<A>) -> Vec<String> {
        editor.sections().into_iter().map(|s| s.name).collect()
    }

    fn heading(data: &SectionData) -> String {
        match data {
            SectionData::About(about) => about.heading.clone(),
            other => panic!("expected about data, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_sorts_cards() {
        let (a, b, c) = abc();
        let editor = editor_with(vec![c, a, b]).await;

        assert_eq!(names(&editor), vec!["a", "b", "c"]);
        assert!(editor.cards().iter().all(|c| c.phase() == CardPhase::Viewing));
    }

    #[tokio::test]
    async fn test_load_failure_notifies() {
        let mut editor = SectionEditor::new(StoreApi::new(Vec::new()));
        editor.api().fail_next(ClientError::Network("refused".into()));

        assert!(editor.load().await.is_err());
        assert_eq!(editor.notifications().len(), 1);
        assert_eq!(editor.notifications()[0].level, NotificationLevel::Error);
    }

    // ========================================================================
    // Reorder
    // ========================================================================

    #[tokio::test]
    async fn test_move_to_front_is_one_reorder_call() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b.clone(), c.clone()]).await;

        editor.move_section(c.id, 0).await.unwrap();

        assert_eq!(names(&editor), vec!["c", "a", "b"]);
        assert_eq!(editor.api().count("reorder"), 1);
        let orders: Vec<f64> = editor.sections().iter().map(|s| s.order.value()).collect();
        assert_eq!(orders, vec![1.0, 2.0, 3.0]);

        let stored = editor.api().store.list(Some(MAIN_HOMEPAGE)).await;
        let stored_names: Vec<&str> = stored.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(stored_names, vec!["c", "a", "b"]);
        for s in &stored {
            let card = editor.card(s.id).unwrap();
            assert_eq!(card.confirmed().version, s.version);
            assert_eq!(card.confirmed().order, s.order);
        }
    }

    #[tokio::test]
    async fn test_move_failure_rolls_back() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a, b, c.clone()]).await;
        editor.api().fail_next(ClientError::Network("down".into()));

        let err = editor.move_section(c.id, 0).await.unwrap_err();

        assert!(matches!(err, EditorError::Client(ClientError::Network(_))));
        assert_eq!(names(&editor), vec!["a", "b", "c"]);
        assert_eq!(editor.notifications().len(), 1);

        // not left busy
        editor.move_section(c.id, 0).await.unwrap();
        assert_eq!(names(&editor), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_move_applies_before_response() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;

        let ticket = editor.prepare_move(a.id, 2).unwrap();
        assert_eq!(names(&editor), vec!["b", "c", "a"]);
        assert_eq!(ticket.entries().len(), 3);

        let again = editor.prepare_move(a.id, 0);
        assert!(matches!(again, Err(EditorError::Busy(_))));

        editor
            .finish_move(ticket, Err(ClientError::Timeout))
            .unwrap_err();
        assert_eq!(names(&editor), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_save_during_move_keeps_new_position() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a, b, c.clone()]).await;
        editor.begin_edit(c.id).unwrap();
        editor.edit_name(c.id, "c2").unwrap();

        let reorder = editor.prepare_move(c.id, 0).unwrap();
        let save = editor.prepare_save(c.id).unwrap().unwrap();

        let result = editor.api().update_section(save.id(), save.patch()).await;
        editor.finish_save(save, result).unwrap();
        assert_eq!(names(&editor), vec!["c2", "a", "b"]);

        let result = editor.api().reorder_sections(reorder.entries()).await;
        editor.finish_move(reorder, result).unwrap();

        let stored = editor.api().store.list(Some(MAIN_HOMEPAGE)).await;
        let stored_names: Vec<String> = stored.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names(&editor), stored_names);
        assert_eq!(names(&editor), vec!["c2", "a", "b"]);
        for s in &stored {
            let card = editor.card(s.id).unwrap();
            assert_eq!(card.section().order, s.order);
            assert_eq!(card.confirmed().version, s.version);
        }
    }

    // ========================================================================
    // Toggle
    // ========================================================================

    #[tokio::test]
    async fn test_toggle_is_optimistic() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;

        let ticket = editor.prepare_toggle(a.id).unwrap();
        let card = editor.card(a.id).unwrap();
        assert!(!card.section().enabled);
        assert!(card.confirmed().enabled);
        assert_eq!(card.phase(), CardPhase::Saving);

        let result = editor.api().update_section(ticket.id(), ticket.patch()).await;
        let saved = editor.finish_toggle(ticket, result).unwrap();

        assert!(!saved.enabled);
        let card = editor.card(a.id).unwrap();
        assert!(!card.confirmed().enabled);
        assert_eq!(card.phase(), CardPhase::Viewing);
    }

    #[tokio::test]
    async fn test_toggle_failure_restores_and_flags_reauth() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.api().fail_next(ClientError::Unauthorized("bad token".into()));

        assert!(editor.toggle(a.id).await.is_err());

        let card = editor.card(a.id).unwrap();
        assert!(card.section().enabled);
        assert!(card.error().is_some());
        assert!(editor.needs_reauth());
        assert_eq!(editor.notifications().len(), 1);

        editor.clear_reauth();
        assert!(!editor.needs_reauth());
    }

    #[tokio::test]
    async fn test_toggle_keeps_edit_phase() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.begin_edit(a.id).unwrap();
        editor.edit_name(a.id, "Renamed").unwrap();

        editor.toggle(a.id).await.unwrap();

        let card = editor.card(a.id).unwrap();
        assert_eq!(card.phase(), CardPhase::Editing);
        assert_eq!(card.draft().unwrap().name, "Renamed");
        assert!(!card.section().enabled);
    }

    // ========================================================================
    // Edit and save
    // ========================================================================

    #[tokio::test]
    async fn test_save_edits() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;

        editor.begin_edit(a.id).unwrap();
        editor.edit_name(a.id, "About us").unwrap();
        editor.edit_field(a.id, "heading", json!("Who we are")).unwrap();
        assert!(editor.card(a.id).unwrap().is_dirty());

        let saved = editor.save(a.id).await.unwrap();

        assert_eq!(saved.name, "About us");
        let card = editor.card(a.id).unwrap();
        assert_eq!(card.phase(), CardPhase::Viewing);
        assert!(card.draft().is_none());
        assert_eq!(heading(&card.section().data), "Who we are");

        let stored = editor.api().store.get(a.id).await.unwrap();
        assert_eq!(heading(&stored.data), "Who we are");
    }

    #[tokio::test]
    async fn test_wrong_field_type_stays_local() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.begin_edit(a.id).unwrap();

        assert!(editor.edit_field(a.id, "heading", json!(42)).is_err());

        let card = editor.card(a.id).unwrap();
        assert!(card.error().is_some());
        assert_eq!(heading(&card.draft().unwrap().data), "");
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.begin_edit(a.id).unwrap();
        editor.edit_name(a.id, "   ").unwrap();

        let err = editor.save(a.id).await.unwrap_err();

        assert!(matches!(err, EditorError::Invalid(_)));
        let card = editor.card(a.id).unwrap();
        assert_eq!(card.phase(), CardPhase::Editing);
        assert!(card.error().is_some());
        assert_eq!(editor.api().count("update"), 0);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_draft() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.begin_edit(a.id).unwrap();
        editor.edit_name(a.id, "Renamed").unwrap();
        editor.api().fail_next(ClientError::Network("down".into()));

        assert!(editor.save(a.id).await.is_err());

        let card = editor.card(a.id).unwrap();
        assert_eq!(card.phase(), CardPhase::Editing);
        assert_eq!(card.draft().unwrap().name, "Renamed");
        assert_eq!(card.section().name, "a");
        assert!(card.error().is_some());
        assert_eq!(editor.notifications().len(), 1);

        // retry succeeds with the same draft
        let saved = editor.save(a.id).await.unwrap();
        assert_eq!(saved.name, "Renamed");
    }

    #[tokio::test]
    async fn test_server_validation_error_shown_on_card_only() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.begin_edit(a.id).unwrap();
        editor.edit_name(a.id, "Renamed").unwrap();
        editor.api().fail_next(ClientError::Validation("name taken".into()));

        assert!(editor.save(a.id).await.is_err());

        assert_eq!(editor.card(a.id).unwrap().error(), Some("name taken"));
        assert!(editor.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_save_without_changes_sends_nothing() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.begin_edit(a.id).unwrap();

        let section = editor.save(a.id).await.unwrap();

        assert_eq!(section.id, a.id);
        assert_eq!(editor.card(a.id).unwrap().phase(), CardPhase::Viewing);
        assert_eq!(editor.api().count("update"), 0);
    }

    #[tokio::test]
    async fn test_cancel_edit_discards_draft() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.begin_edit(a.id).unwrap();
        editor.edit_name(a.id, "Renamed").unwrap();

        editor.cancel_edit(a.id).unwrap();

        let card = editor.card(a.id).unwrap();
        assert_eq!(card.phase(), CardPhase::Viewing);
        assert!(card.draft().is_none());
        assert_eq!(card.section().name, "a");
    }

    #[tokio::test]
    async fn test_stale_save_conflicts_with_version_check() {
        let (a, b, c) = abc();
        let mut editor = SectionEditor::new(StoreApi::new(vec![a.clone(), b, c])).with_version_check(true);
        editor.load().await.unwrap();

        // someone else edits first
        editor
            .api()
            .store
            .update(a.id, UpdateSection::enabled(false))
            .await
            .unwrap();

        editor.begin_edit(a.id).unwrap();
        editor.edit_name(a.id, "Mine").unwrap();
        let err = editor.save(a.id).await.unwrap_err();

        assert!(matches!(err, EditorError::Client(ClientError::Conflict(_))));
        assert!(editor.notifications()[0].message.contains("Reload"));
    }

    #[tokio::test]
    async fn test_busy_card_rejects_other_operations() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        let _ticket = editor.prepare_toggle(a.id).unwrap();

        assert!(matches!(
            editor.begin_edit(a.id),
            Err(EditorError::InvalidPhase { action: "edit", .. })
        ));
        assert!(matches!(
            editor.prepare_remove(a.id),
            Err(EditorError::InvalidPhase { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_section() {
        let mut editor = editor_with(Vec::new()).await;
        let id = SectionId::from_u128(9);
        assert_eq!(editor.begin_edit(id), Err(EditorError::UnknownSection(id)));
    }

    // ========================================================================
    // Add / remove
    // ========================================================================

    #[tokio::test]
    async fn test_add_section_appends() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a, b, c]).await;

        let added = editor.add_section(SectionKind::News, "Club news", false).await.unwrap();

        assert_eq!(added.order.value(), 4.0);
        assert!(!added.enabled);
        assert_eq!(added.component(), "NewsSection");
        assert_eq!(names(&editor), vec!["a", "b", "c", "Club news"]);
        assert_eq!(editor.notifications()[0].level, NotificationLevel::Info);
    }

    #[tokio::test]
    async fn test_add_blank_name_rejected_locally() {
        let mut editor = editor_with(Vec::new()).await;
        let err = editor.add_section(SectionKind::News, "", true).await.unwrap_err();
        assert!(matches!(err, EditorError::Invalid(_)));
        assert_eq!(editor.api().count("create"), 0);
    }

    #[tokio::test]
    async fn test_remove_section() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a, b.clone(), c]).await;

        editor.remove_section(b.id).await.unwrap();

        assert_eq!(names(&editor), vec!["a", "c"]);
        assert_eq!(editor.api().store.len().await, 2);
    }

    #[tokio::test]
    async fn test_remove_failure_reinserts_in_place() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a, b.clone(), c]).await;
        editor.api().fail_next(ClientError::Timeout);

        assert!(editor.remove_section(b.id).await.is_err());

        assert_eq!(names(&editor), vec!["a", "b", "c"]);
        assert_eq!(editor.api().store.len().await, 3);
    }

    #[tokio::test]
    async fn test_remove_already_gone_counts_as_removed() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a, b.clone(), c]).await;
        editor.api().fail_next(ClientError::NotFound("gone".into()));

        editor.remove_section(b.id).await.unwrap();

        assert_eq!(names(&editor), vec!["a", "c"]);
        assert!(editor.notifications().is_empty());
    }

    // ========================================================================
    // Uploads and notifications
    // ========================================================================

    #[tokio::test]
    async fn test_upload_updates_card_and_draft() {
        let hero = Section::with_data(
            "Hero",
            SectionData::Hero(HeroData {
                title: "Run".to_string(),
                ..HeroData::default()
            }),
            1.into(),
        );
        let mut editor = editor_with(vec![hero.clone()]).await;
        editor.begin_edit(hero.id).unwrap();

        let image = ImageFile::new("bg.png", vec![1, 2, 3]);
        editor.upload_image(hero.id, ImageSlot::Hero, image).await.unwrap();

        let card = editor.card(hero.id).unwrap();
        assert_eq!(card.phase(), CardPhase::Editing);
        for data in [&card.section().data, &card.draft().unwrap().data] {
            match data {
                SectionData::Hero(h) => assert_eq!(h.background_image.as_deref(), Some("/uploads/bg.png")),
                other => panic!("expected hero data, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_upload_to_wrong_slot_rejected_locally() {
        let (a, _, _) = abc();
        let mut editor = editor_with(vec![a.clone()]).await;

        let image = ImageFile::new("bg.png", vec![1]);
        let err = editor.upload_image(a.id, ImageSlot::Hero, image).await.unwrap_err();

        assert!(matches!(err, EditorError::Invalid(_)));
        assert_eq!(editor.api().count("upload"), 0);
    }

    #[tokio::test]
    async fn test_dismiss_notification() {
        let (a, b, c) = abc();
        let mut editor = editor_with(vec![a.clone(), b, c]).await;
        editor.api().fail_next(ClientError::Timeout);
        let _ = editor.toggle(a.id).await;

        let id = editor.notifications()[0].id;
        assert!(editor.dismiss(id));
        assert!(!editor.dismiss(id));
        assert!(editor.notifications().is_empty());
    }
}
