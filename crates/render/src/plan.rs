//! Render planning
//!
//! Turning a section list into a page happens in two steps. Planning is
//! plain data: sort, filter for the mode, resolve components, fill the
//! countdown date. Drawing (see [`crate::page`]) only walks the plan.

use crate::registry::{Resolution, SectionRegistry};
use heck::ToKebabCase;
use homestretch_sections::data::CountdownData;
use homestretch_sections::{Section, SectionData, SectionId, sorted};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// RenderMode
// ============================================================================

/// Who the page is rendered for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Visitors: enabled sections only
    #[default]
    Public,
    /// Admins: every section, disabled ones marked
    Preview,
}

impl RenderMode {
    pub fn is_preview(self) -> bool {
        matches!(self, RenderMode::Preview)
    }
}

// ============================================================================
// Plan types
// ============================================================================

/// What goes inside one section frame
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedContent {
    /// A resolved component with the payload it receives
    Component(SectionData),
    /// The component name did not resolve
    NotFound { component: String },
}

/// One section, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSection {
    pub id: SectionId,
    pub name: String,
    /// Fragment id for in-page links, unique within a page
    pub anchor: String,
    /// Only ever true in preview mode
    pub disabled: bool,
    pub content: PlannedContent,
}

impl PlannedSection {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, PlannedContent::NotFound { .. })
    }
}

// ============================================================================
// Planning
// ============================================================================

/// Build the render plan for a section list
///
/// The list is sorted before it is filtered, so the public page is always
/// the preview with the disabled sections taken out.
pub fn plan(registry: &SectionRegistry, sections: &[Section], mode: RenderMode) -> Vec<PlannedSection> {
    let mut anchors: HashSet<String> = HashSet::new();

    sorted(sections)
        .into_iter()
        .filter(|section| mode.is_preview() || section.enabled)
        .map(|section| {
            let content = resolve_content(registry, &section);
            if let PlannedContent::NotFound { component } = &content {
                tracing::warn!(section_id = %section.id, component = %component, "component not found");
            }

            PlannedSection {
                id: section.id,
                anchor: unique_anchor(&mut anchors, &section.name),
                name: section.name,
                disabled: !section.enabled,
                content,
            }
        })
        .collect()
}

fn resolve_content(registry: &SectionRegistry, section: &Section) -> PlannedContent {
    match registry.resolve(section.component()) {
        Resolution::Component(kind) if section.data.kind() == Some(kind) => {
            PlannedContent::Component(with_countdown_date(section.data.clone()))
        }
        _ => PlannedContent::NotFound {
            component: section.component().to_string(),
        },
    }
}

/// The countdown always receives a date, the fallback when its own is blank
fn with_countdown_date(data: SectionData) -> SectionData {
    match data {
        SectionData::Countdown(countdown) => {
            let event_date = countdown.effective_event_date().to_string();
            SectionData::Countdown(CountdownData {
                event_date: Some(event_date),
                ..countdown
            })
        }
        other => other,
    }
}

fn unique_anchor(seen: &mut HashSet<String>, name: &str) -> String {
    let base = match name.to_kebab_case() {
        kebab if kebab.is_empty() => "section".to_string(),
        kebab => kebab,
    };

    let mut candidate = base.clone();
    let mut suffix = 1;
    while seen.contains(&candidate) {
        suffix += 1;
        candidate = format!("{base}-{suffix}");
    }
    seen.insert(candidate.clone());
    candidate
}

// ============================================================================
// Tests
// ============================================================================
