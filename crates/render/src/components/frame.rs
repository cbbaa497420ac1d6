//! Page layout: chrome, one frame per section, and the dispatch from a
//! planned section to its component.

use dioxus::prelude::*;
use homestretch_sections::SectionData;

use crate::components::chrome::{Footer, Navbar, SiteChrome};
use crate::components::content::{AboutSection, CallToAction, StatsSection, StorySection};
use crate::components::countdown::CountdownTimer;
use crate::components::hero::HeroSection;
use crate::components::listings::{EventsSection, NewsSection, ShopSection, SponsorsSection};
use crate::components::placeholder::ComponentNotFound;
use crate::plan::{PlannedContent, PlannedSection};

// ============================================================================
// HomePage
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct HomePageProps {
    pub chrome: SiteChrome,
    pub sections: Vec<PlannedSection>,
    #[props(default = false)]
    pub preview: bool,
}

/// Navbar, the planned sections in order, Footer
#[component]
pub fn HomePage(props: HomePageProps) -> Element {
    let main_class = if props.preview {
        "homepage homepage--preview"
    } else {
        "homepage"
    };

    rsx! {
        Navbar { chrome: props.chrome.clone() }
        main { class: "{main_class}",
            if props.preview {
                div { class: "preview-banner", "Preview: disabled sections are dimmed and hidden from visitors" }
            }
            for section in props.sections.iter() {
                SectionFrame { key: "{section.id}", section: section.clone() }
            }
        }
        Footer { chrome: props.chrome.clone() }
    }
}

// ============================================================================
// SectionFrame
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct SectionFrameProps {
    pub section: PlannedSection,
}

/// Wrapper carrying the section id, its anchor and the disabled marking
#[component]
pub fn SectionFrame(props: SectionFrameProps) -> Element {
    let section = &props.section;

    if section.disabled {
        return rsx! {
            section {
                id: "{section.anchor}",
                class: "section-frame section-frame--disabled",
                style: "opacity: 0.4; pointer-events: none",
                "data-section-id": "{section.id}",
                "data-disabled": "true",
                "aria-disabled": "true",
                div { class: "section-frame__badge", "Hidden: {section.name}" }
                SectionBody { content: section.content.clone() }
            }
        };
    }

    rsx! {
        section {
            id: "{section.anchor}",
            class: "section-frame",
            "data-section-id": "{section.id}",
            SectionBody { content: section.content.clone() }
        }
    }
}

// ============================================================================
// SectionBody
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct SectionBodyProps {
    pub content: PlannedContent,
}

/// The payload is the only input the chosen component receives
#[component]
pub fn SectionBody(props: SectionBodyProps) -> Element {
    match props.content {
        PlannedContent::Component(SectionData::Hero(data)) => rsx! { HeroSection { data: data } },
        PlannedContent::Component(SectionData::About(data)) => rsx! { AboutSection { data: data } },
        PlannedContent::Component(SectionData::Story(data)) => rsx! { StorySection { data: data } },
        PlannedContent::Component(SectionData::Stats(data)) => rsx! { StatsSection { data: data } },
        PlannedContent::Component(SectionData::Countdown(data)) => {
            rsx! { CountdownTimer { data: data } }
        }
        PlannedContent::Component(SectionData::Events(data)) => rsx! { EventsSection { data: data } },
        PlannedContent::Component(SectionData::News(data)) => rsx! { NewsSection { data: data } },
        PlannedContent::Component(SectionData::Shop(data)) => rsx! { ShopSection { data: data } },
        PlannedContent::Component(SectionData::Sponsors(data)) => {
            rsx! { SponsorsSection { data: data } }
        }
        PlannedContent::Component(SectionData::CallToAction(data)) => {
            rsx! { CallToAction { data: data } }
        }
        PlannedContent::Component(SectionData::Unknown { component, .. })
        | PlannedContent::NotFound { component } => {
            rsx! { ComponentNotFound { component: component } }
        }
    }
}
