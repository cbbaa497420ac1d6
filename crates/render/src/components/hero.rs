//! Hero banner

use dioxus::prelude::*;
use homestretch_sections::data::HeroData;

#[derive(Props, Clone, PartialEq)]
pub struct HeroSectionProps {
    pub data: HeroData,
}

/// Full-width banner; the uploaded background image is applied inline
#[component]
pub fn HeroSection(props: HeroSectionProps) -> Element {
    let data = &props.data;
    let style = data
        .background_image
        .as_deref()
        .map(|url| format!("background-image: url('{url}')"))
        .unwrap_or_default();

    rsx! {
        div { class: "hero", style: "{style}",
            h1 { class: "hero__title", "{data.title}" }
            if let Some(subtitle) = &data.subtitle {
                p { class: "hero__subtitle", "{subtitle}" }
            }
            if let (Some(label), Some(link)) = (&data.cta_label, &data.cta_link) {
                a { class: "hero__cta", href: "{link}", "{label}" }
            }
        }
    }
}
