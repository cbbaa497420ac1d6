//! List sections: events, news, shop products and sponsors
//!
//! Each renders the entries stored in its own payload. An empty list still
//! renders the heading, so a freshly added section is visible in preview.

use dioxus::prelude::*;
use homestretch_sections::data::{EventsData, NewsData, ShopData, SponsorsData};

// ============================================================================
// Events
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct EventsSectionProps {
    pub data: EventsData,
}

/// Upcoming events, capped at `limit` when one is set
#[component]
pub fn EventsSection(props: EventsSectionProps) -> Element {
    let data = &props.data;
    let limit = data.limit.map_or(data.events.len(), |limit| limit as usize);

    rsx! {
        div { class: "events",
            h2 { "{data.heading}" }
            if data.events.is_empty() {
                p { class: "events__empty", "No upcoming events." }
            }
            ul { class: "events__list",
                for event in data.events.iter().take(limit) {
                    li { class: "events__item",
                        span { class: "events__date", "{event.date}" }
                        if let Some(link) = &event.link {
                            a { class: "events__title", href: "{link}", "{event.title}" }
                        } else {
                            span { class: "events__title", "{event.title}" }
                        }
                        if let Some(location) = &event.location {
                            span { class: "events__location", "{location}" }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// News
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct NewsSectionProps {
    pub data: NewsData,
}

#[component]
pub fn NewsSection(props: NewsSectionProps) -> Element {
    let data = &props.data;

    rsx! {
        div { class: "news",
            h2 { "{data.heading}" }
            for item in data.items.iter() {
                article { class: "news__item",
                    if let Some(link) = &item.link {
                        h3 { a { href: "{link}", "{item.title}" } }
                    } else {
                        h3 { "{item.title}" }
                    }
                    if let Some(published) = &item.published {
                        p { class: "news__date", "{published}" }
                    }
                    if let Some(summary) = &item.summary {
                        p { class: "news__summary", "{summary}" }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Shop
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ShopSectionProps {
    pub data: ShopData,
}

#[component]
pub fn ShopSection(props: ShopSectionProps) -> Element {
    let data = &props.data;

    rsx! {
        div { class: "shop",
            h2 { "{data.heading}" }
            ul { class: "shop__products",
                for product in data.products.iter() {
                    li { class: "shop__product",
                        if let Some(image) = &product.image {
                            img { src: "{image}", alt: "{product.name}" }
                        }
                        span { class: "shop__name", "{product.name}" }
                        span { class: "shop__price", "{product.price}" }
                        if let Some(link) = &product.link {
                            a { class: "shop__link", href: "{link}", "View" }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Sponsors
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct SponsorsSectionProps {
    pub data: SponsorsData,
}

#[component]
pub fn SponsorsSection(props: SponsorsSectionProps) -> Element {
    let data = &props.data;

    rsx! {
        div { class: "sponsors",
            h2 { "{data.heading}" }
            ul { class: "sponsors__list",
                for sponsor in data.sponsors.iter() {
                    li { class: "sponsors__item",
                        if let Some(logo) = &sponsor.logo {
                            img { src: "{logo}", alt: "{sponsor.name}" }
                        } else {
                            span { "{sponsor.name}" }
                        }
                    }
                }
            }
        }
    }
}
