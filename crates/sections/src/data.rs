//! Typed section payloads
//!
//! `sectionData` travels as an open JSON object whose shape depends on the
//! section's component. Inside the crate it is a tagged union keyed by the
//! component: each known kind has its own schema, anything else is kept
//! verbatim in [`SectionData::Unknown`] so it can round-trip untouched.
//!
//! Every schema defaults all of its fields, so `{}` (or a missing payload)
//! is a valid configuration for any known component.

use crate::kind::SectionKind;
use homestretch_core::{SiteError, SiteResult};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Event date the countdown falls back to when its payload has none
pub const DEFAULT_COUNTDOWN_DATE: &str = "2025-12-28T04:30:00";

// ============================================================================
// Per-component schemas
// ============================================================================

/// Payload of `HeroSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroData {
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image: Option<String>,
    pub cta_label: Option<String>,
    pub cta_link: Option<String>,
}

/// Payload of `AboutSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutData {
    pub heading: String,
    pub body: String,
    pub image: Option<String>,
}

/// Payload of `StorySection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoryData {
    pub heading: String,
    pub body: String,
    pub image: Option<String>,
    pub quote: Option<String>,
}

/// One figure in a `StatsSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatItem {
    pub label: String,
    pub value: String,
}

/// Payload of `StatsSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsData {
    pub heading: Option<String>,
    pub stats: Vec<StatItem>,
}

/// Payload of `CountdownTimer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownData {
    pub title: Option<String>,
    pub event_date: Option<String>,
    pub location: Option<String>,
}

impl CountdownData {
    /// The configured date, or [`DEFAULT_COUNTDOWN_DATE`] when it is
    /// missing or blank
    pub fn effective_event_date(&self) -> &str {
        match self.event_date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => date,
            _ => DEFAULT_COUNTDOWN_DATE,
        }
    }
}

/// One entry of an `EventsSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventItem {
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    pub link: Option<String>,
}

/// Payload of `EventsSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventsData {
    pub heading: String,
    pub events: Vec<EventItem>,
    /// Maximum number of events shown, all when unset
    pub limit: Option<u32>,
}

/// One entry of a `NewsSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
}

/// Payload of `NewsSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsData {
    pub heading: String,
    pub items: Vec<NewsItem>,
}

/// One product of a `ShopSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductItem {
    pub name: String,
    pub price: String,
    pub image: Option<String>,
    pub link: Option<String>,
}

/// Payload of `ShopSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShopData {
    pub heading: String,
    pub products: Vec<ProductItem>,
}

/// One sponsor of a `SponsorsSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sponsor {
    pub name: String,
    pub logo: Option<String>,
    pub link: Option<String>,
}

/// Payload of `SponsorsSection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SponsorsData {
    pub heading: String,
    pub sponsors: Vec<Sponsor>,
}

/// Payload of `CallToAction`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallToActionData {
    pub heading: String,
    pub body: Option<String>,
    pub button_label: String,
    pub button_link: String,
}

// ============================================================================
// SectionData
// ============================================================================

/// Configuration payload of a section, tagged by its component
#[derive(Debug, Clone, PartialEq)]
pub enum SectionData {
    Hero(HeroData),
    About(AboutData),
    Story(StoryData),
    Stats(StatsData),
    Countdown(CountdownData),
    Events(EventsData),
    News(NewsData),
    Shop(ShopData),
    Sponsors(SponsorsData),
    CallToAction(CallToActionData),
    /// A component this build has no schema for; the payload is kept as-is
    Unknown { component: String, payload: Value },
}

impl SectionData {
    /// Decode a payload for the given component name
    ///
    /// A `null` payload counts as `{}`. Known components must receive a
    /// JSON object matching their schema; unknown components accept any
    /// payload.
    pub fn from_parts(component: &str, payload: Value) -> SiteResult<Self> {
        let payload = match payload {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        let Some(kind) = SectionKind::from_component(component) else {
            return Ok(SectionData::Unknown {
                component: component.to_string(),
                payload,
            });
        };

        if !payload.is_object() {
            return Err(SiteError::invalid_data(component, "sectionData must be a JSON object"));
        }

        let invalid = |e: serde_json::Error| SiteError::invalid_data(component, e.to_string());

        Ok(match kind {
            SectionKind::Hero => SectionData::Hero(serde_json::from_value(payload).map_err(invalid)?),
            SectionKind::About => SectionData::About(serde_json::from_value(payload).map_err(invalid)?),
            SectionKind::Story => SectionData::Story(serde_json::from_value(payload).map_err(invalid)?),
            SectionKind::Stats => SectionData::Stats(serde_json::from_value(payload).map_err(invalid)?),
            SectionKind::Countdown => {
                SectionData::Countdown(serde_json::from_value(payload).map_err(invalid)?)
            }
            SectionKind::Events => {
                SectionData::Events(serde_json::from_value(payload).map_err(invalid)?)
            }
            SectionKind::News => SectionData::News(serde_json::from_value(payload).map_err(invalid)?),
            SectionKind::Shop => SectionData::Shop(serde_json::from_value(payload).map_err(invalid)?),
            SectionKind::Sponsors => {
                SectionData::Sponsors(serde_json::from_value(payload).map_err(invalid)?)
            }
            SectionKind::CallToAction => {
                SectionData::CallToAction(serde_json::from_value(payload).map_err(invalid)?)
            }
        })
    }

    /// Empty configuration for a kind
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Hero => SectionData::Hero(HeroData::default()),
            SectionKind::About => SectionData::About(AboutData::default()),
            SectionKind::Story => SectionData::Story(StoryData::default()),
            SectionKind::Stats => SectionData::Stats(StatsData::default()),
            SectionKind::Countdown => SectionData::Countdown(CountdownData::default()),
            SectionKind::Events => SectionData::Events(EventsData::default()),
            SectionKind::News => SectionData::News(NewsData::default()),
            SectionKind::Shop => SectionData::Shop(ShopData::default()),
            SectionKind::Sponsors => SectionData::Sponsors(SponsorsData::default()),
            SectionKind::CallToAction => SectionData::CallToAction(CallToActionData::default()),
        }
    }

    /// The kind, `None` for unknown components
    pub fn kind(&self) -> Option<SectionKind> {
        match self {
            SectionData::Hero(_) => Some(SectionKind::Hero),
            SectionData::About(_) => Some(SectionKind::About),
            SectionData::Story(_) => Some(SectionKind::Story),
            SectionData::Stats(_) => Some(SectionKind::Stats),
            SectionData::Countdown(_) => Some(SectionKind::Countdown),
            SectionData::Events(_) => Some(SectionKind::Events),
            SectionData::News(_) => Some(SectionKind::News),
            SectionData::Shop(_) => Some(SectionKind::Shop),
            SectionData::Sponsors(_) => Some(SectionKind::Sponsors),
            SectionData::CallToAction(_) => Some(SectionKind::CallToAction),
            SectionData::Unknown { .. } => None,
        }
    }

    /// The component name this payload belongs to
    pub fn component(&self) -> &str {
        match self {
            SectionData::Unknown { component, .. } => component,
            known => known
                .kind()
                .map(|kind| kind.component_name())
                .unwrap_or_default(),
        }
    }

    /// Payload as a JSON value, the shape sent on the wire
    pub fn to_value(&self) -> SiteResult<Value> {
        serde_json::to_value(self).map_err(Into::into)
    }

    /// Set one top-level field, re-validating against the schema
    ///
    /// Used by the editor to buffer single-field edits: the payload is
    /// rebuilt from JSON so a value of the wrong type is rejected here
    /// rather than by the server.
    pub fn with_field(&self, key: &str, value: Value) -> SiteResult<Self> {
        let mut payload = self.to_value()?;
        let Some(object) = payload.as_object_mut() else {
            return Err(SiteError::invalid_data(
                self.component(),
                "sectionData is not an object",
            ));
        };
        object.insert(key.to_string(), value);
        Self::from_parts(self.component(), payload)
    }
}

impl Serialize for SectionData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SectionData::Hero(data) => data.serialize(serializer),
            SectionData::About(data) => data.serialize(serializer),
            SectionData::Story(data) => data.serialize(serializer),
            SectionData::Stats(data) => data.serialize(serializer),
            SectionData::Countdown(data) => data.serialize(serializer),
            SectionData::Events(data) => data.serialize(serializer),
            SectionData::News(data) => data.serialize(serializer),
            SectionData::Shop(data) => data.serialize(serializer),
            SectionData::Sponsors(data) => data.serialize(serializer),
            SectionData::CallToAction(data) => data.serialize(serializer),
            SectionData::Unknown { payload, .. } => payload.serialize(serializer),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
