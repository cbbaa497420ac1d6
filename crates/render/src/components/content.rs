//! Text-centred sections: about, story, stats and the closing call to action

use dioxus::prelude::*;
use homestretch_sections::data::{AboutData, CallToActionData, StatsData, StoryData};

// ============================================================================
// About
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct AboutSectionProps {
    pub data: AboutData,
}

#[component]
pub fn AboutSection(props: AboutSectionProps) -> Element {
    let data = &props.data;

    rsx! {
        div { class: "about",
            h2 { "{data.heading}" }
            if let Some(image) = &data.image {
                img { class: "about__image", src: "{image}", alt: "{data.heading}" }
            }
            p { class: "about__body", "{data.body}" }
        }
    }
}

// ============================================================================
// Story
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct StorySectionProps {
    pub data: StoryData,
}

#[component]
pub fn StorySection(props: StorySectionProps) -> Element {
    let data = &props.data;

    rsx! {
        div { class: "story",
            if let Some(image) = &data.image {
                img { class: "story__image", src: "{image}", alt: "{data.heading}" }
            }
            div { class: "story__text",
                h2 { "{data.heading}" }
                p { "{data.body}" }
                if let Some(quote) = &data.quote {
                    blockquote { class: "story__quote", "{quote}" }
                }
            }
        }
    }
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct StatsSectionProps {
    pub data: StatsData,
}

#[component]
pub fn StatsSection(props: StatsSectionProps) -> Element {
    let data = &props.data;

    rsx! {
        div { class: "stats",
            if let Some(heading) = &data.heading {
                h2 { "{heading}" }
            }
            ul { class: "stats__list",
                for stat in data.stats.iter() {
                    li { class: "stats__item",
                        span { class: "stats__value", "{stat.value}" }
                        span { class: "stats__label", "{stat.label}" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Call to action
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct CallToActionProps {
    pub data: CallToActionData,
}

#[component]
pub fn CallToAction(props: CallToActionProps) -> Element {
    let data = &props.data;

    rsx! {
        div { class: "cta",
            h2 { "{data.heading}" }
            if let Some(body) = &data.body {
                p { "{body}" }
            }
            a { class: "cta__button", href: "{data.button_link}", "{data.button_label}" }
        }
    }
}
