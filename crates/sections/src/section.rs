//! Section records and the request payloads that create or change them
//!
//! On the wire a section is a flat camelCase JSON object:
//!
//! ```json
//! {
//!   "id": "…", "homepageId": "…", "name": "Race countdown",
//!   "component": "CountdownTimer", "type": "feature",
//!   "enabled": true, "order": 2,
//!   "sectionData": { "eventDate": "2025-12-28T04:30:00" },
//!   "version": 3, "createdAt": "…", "updatedAt": "…"
//! }
//! ```
//!
//! `component` and `sectionData` are folded into the typed [`SectionData`]
//! when the record is decoded.

use crate::data::SectionData;
use crate::kind::SectionKind;
use chrono::Utc;
use homestretch_core::{
    HomepageId, MAIN_HOMEPAGE, SectionId, SectionOrder, SiteError, SiteResult, Timestamp,
    Versioned,
};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

// ============================================================================
// Section
// ============================================================================

/// One configurable, orderable block of a homepage
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "SectionRecord")]
pub struct Section {
    /// Stable identifier assigned by the store
    pub id: SectionId,

    /// Owning homepage
    pub homepage_id: HomepageId,

    /// Label shown in the editor
    pub name: String,

    /// Coarse category tag (`hero`, `content`, ...) for filtering
    pub section_type: String,

    /// Whether the public page shows this section
    pub enabled: bool,

    /// Render rank, ascending
    pub order: SectionOrder,

    /// Typed payload; also determines the component name
    pub data: SectionData,

    /// Bumped by every stored mutation
    pub version: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Section {
    /// Create a new enabled section for a known kind with an empty payload
    pub fn new(name: impl Into<String>, kind: SectionKind, order: SectionOrder) -> Self {
        Self::with_data(name, SectionData::empty(kind), order)
    }

    /// Create a new enabled section with the given payload
    pub fn with_data(name: impl Into<String>, data: SectionData, order: SectionOrder) -> Self {
        let now = Utc::now();
        let section_type = data
            .kind()
            .map(|kind| kind.default_type())
            .unwrap_or("content")
            .to_string();

        Self {
            id: Uuid::new_v4(),
            homepage_id: MAIN_HOMEPAGE,
            name: name.into(),
            section_type,
            enabled: true,
            order,
            data,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the homepage
    pub fn on_homepage(mut self, homepage_id: HomepageId) -> Self {
        self.homepage_id = homepage_id;
        self
    }

    /// Set the enabled flag
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Override the category tag
    pub fn with_type(mut self, section_type: impl Into<String>) -> Self {
        self.section_type = section_type.into();
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The component name used for registry lookup
    pub fn component(&self) -> &str {
        self.data.component()
    }

    /// The kind, `None` when the component is unknown to this build
    pub fn kind(&self) -> Option<SectionKind> {
        self.data.kind()
    }

    /// Whether this is the hero banner
    pub fn is_hero(&self) -> bool {
        self.kind() == Some(SectionKind::Hero)
    }
}

impl Versioned for Section {
    fn record_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn bump(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

// ============================================================================
// Wire records
// ============================================================================

/// Owned wire shape used for decoding
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionRecord {
    id: SectionId,
    #[serde(default = "main_homepage")]
    homepage_id: HomepageId,
    name: String,
    component: String,
    #[serde(rename = "type", default)]
    section_type: Option<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
    order: SectionOrder,
    #[serde(default)]
    section_data: Value,
    #[serde(default)]
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Borrowed wire shape used for encoding
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionRecordRef<'a> {
    id: &'a SectionId,
    homepage_id: &'a HomepageId,
    name: &'a str,
    component: &'a str,
    #[serde(rename = "type")]
    section_type: &'a str,
    enabled: bool,
    order: SectionOrder,
    section_data: &'a SectionData,
    version: u64,
    created_at: &'a Timestamp,
    updated_at: &'a Timestamp,
}

fn main_homepage() -> HomepageId {
    MAIN_HOMEPAGE
}

fn default_enabled() -> bool {
    true
}

impl TryFrom<SectionRecord> for Section {
    type Error = SiteError;

    fn try_from(record: SectionRecord) -> Result<Self, Self::Error> {
        let data = SectionData::from_parts(&record.component, record.section_data)?;
        let section_type = record.section_type.unwrap_or_else(|| {
            data.kind()
                .map(|kind| kind.default_type())
                .unwrap_or("content")
                .to_string()
        });

        Ok(Section {
            id: record.id,
            homepage_id: record.homepage_id,
            name: record.name,
            section_type,
            enabled: record.enabled,
            order: record.order,
            data,
            version: record.version,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SectionRecordRef {
            id: &self.id,
            homepage_id: &self.homepage_id,
            name: &self.name,
            component: self.component(),
            section_type: &self.section_type,
            enabled: self.enabled,
            order: self.order,
            section_data: &self.data,
            version: self.version,
            created_at: &self.created_at,
            updated_at: &self.updated_at,
        }
        .serialize(serializer)
    }
}

// ============================================================================
// CreateSection
// ============================================================================

/// Body of `POST /homepage-sections`
///
/// Any client-supplied `id` is ignored; the store assigns identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSection {
    pub name: String,
    pub component: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SectionOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_id: Option<HomepageId>,
}

impl CreateSection {
    /// Request for a known kind with its default payload
    pub fn for_kind(name: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            name: name.into(),
            component: kind.component_name().to_string(),
            ..Self::default()
        }
    }

    /// Attach a payload
    pub fn with_data(mut self, data: Value) -> Self {
        self.section_data = Some(data);
        self
    }

    /// Build the stored section; `fallback_order` is used when the request
    /// carries no order
    pub fn into_section(self, fallback_order: SectionOrder) -> SiteResult<Section> {
        let data = SectionData::from_parts(&self.component, self.section_data.unwrap_or(Value::Null))?;
        let mut section = Section::with_data(self.name, data, self.order.unwrap_or(fallback_order))
            .on_homepage(self.homepage_id.unwrap_or(MAIN_HOMEPAGE))
            .enabled(self.enabled.unwrap_or(true));
        if let Some(section_type) = self.section_type {
            section.section_type = section_type;
        }
        Ok(section)
    }
}

// ============================================================================
// UpdateSection
// ============================================================================

/// Body of `PUT/PATCH /homepage-sections/{id}`: every field is optional
///
/// `sectionData` replaces the whole payload, there is no deep merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SectionOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_data: Option<Value>,
    /// When set, the update is rejected unless the stored version matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

impl UpdateSection {
    /// Update that only flips the enabled flag
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::default()
        }
    }

    /// Update that replaces the payload
    pub fn data(data: &SectionData) -> SiteResult<Self> {
        Ok(Self {
            section_data: Some(data.to_value()?),
            ..Self::default()
        })
    }

    /// Require the stored version to match
    pub fn expecting(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }

    /// Whether the request changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.component.is_none()
            && self.section_type.is_none()
            && self.enabled.is_none()
            && self.order.is_none()
            && self.section_data.is_none()
    }

    /// Apply onto a copy of `section`
    ///
    /// The original is left untouched if any part of the update is invalid.
    /// Switching `component` without a payload resets the payload to the
    /// new component's defaults.
    pub fn apply(&self, section: &Section) -> SiteResult<Section> {
        section.check_version(self.expected_version)?;

        let mut next = section.clone();

        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(section_type) = &self.section_type {
            next.section_type = section_type.clone();
        }
        if let Some(enabled) = self.enabled {
            next.enabled = enabled;
        }
        if let Some(order) = self.order {
            next.order = order;
        }

        let component = self
            .component
            .clone()
            .unwrap_or_else(|| section.component().to_string());
        match (&self.section_data, component != section.component()) {
            (Some(payload), _) => {
                next.data = SectionData::from_parts(&component, payload.clone())?;
            }
            (None, true) => {
                next.data = SectionData::from_parts(&component, Value::Null)?;
            }
            (None, false) => {}
        }

        next.bump();
        Ok(next)
    }
}

// ============================================================================
// Reorder / uploads
// ============================================================================

/// One entry of `POST /homepage-sections/reorder`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub id: SectionId,
    pub order: SectionOrder,
}

impl ReorderEntry {
    pub fn new(id: SectionId, order: impl Into<SectionOrder>) -> Self {
        Self {
            id,
            order: order.into(),
        }
    }
}

/// Which image field an upload targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    /// Background of the hero banner
    Hero,
    /// Picture of the story (or about) block
    Story,
}

impl ImageSlot {
    /// Route segment of the upload endpoint
    pub fn route_segment(&self) -> &'static str {
        match self {
            ImageSlot::Hero => "upload-hero-image",
            ImageSlot::Story => "upload-story-image",
        }
    }

    /// Parse `hero` / `story`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hero" => Some(ImageSlot::Hero),
            "story" => Some(ImageSlot::Story),
            _ => None,
        }
    }

    /// Write the asset URL into the payload field for this slot
    pub fn assign(&self, data: &mut SectionData, url: impl Into<String>) -> SiteResult<()> {
        let url = url.into();
        match (self, data) {
            (ImageSlot::Hero, SectionData::Hero(hero)) => hero.background_image = Some(url),
            (ImageSlot::Story, SectionData::Story(story)) => story.image = Some(url),
            (ImageSlot::Story, SectionData::About(about)) => about.image = Some(url),
            (slot, other) => {
                return Err(SiteError::invalid_data(
                    other.component(),
                    format!("component has no {slot:?} image field"),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
