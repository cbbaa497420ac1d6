//! Starter content
//!
//! A fresh install has no sections; the store seeds the homepage with this
//! layout so the public page is never blank.

use crate::data::{
    AboutData, CallToActionData, CountdownData, EventsData, HeroData, NewsData, SectionData,
    SponsorsData, StatItem, StatsData,
};
use crate::kind::SectionKind;
use crate::section::Section;
use homestretch_core::{HomepageId, SectionOrder};

/// Starter payload for a newly added section of `kind`
pub fn starter_data(kind: SectionKind) -> SectionData {
    match kind {
        SectionKind::Hero => SectionData::Hero(HeroData {
            title: "Run With Us".to_string(),
            subtitle: Some("The student marathon club".to_string()),
            cta_label: Some("Join the club".to_string()),
            cta_link: Some("/join".to_string()),
            ..HeroData::default()
        }),
        SectionKind::About => SectionData::About(AboutData {
            heading: "About Us".to_string(),
            body: "We train together every week, from first 5k to full marathon.".to_string(),
            image: None,
        }),
        SectionKind::Stats => SectionData::Stats(StatsData {
            heading: Some("The club in numbers".to_string()),
            stats: vec![
                StatItem {
                    label: "Members".to_string(),
                    value: "0".to_string(),
                },
                StatItem {
                    label: "Kilometres run".to_string(),
                    value: "0".to_string(),
                },
            ],
        }),
        SectionKind::Countdown => SectionData::Countdown(CountdownData {
            title: Some("Race day".to_string()),
            ..CountdownData::default()
        }),
        SectionKind::Events => SectionData::Events(EventsData {
            heading: "Upcoming Events".to_string(),
            ..EventsData::default()
        }),
        SectionKind::News => SectionData::News(NewsData {
            heading: "Latest News".to_string(),
            items: Vec::new(),
        }),
        SectionKind::Sponsors => SectionData::Sponsors(SponsorsData {
            heading: "Our Sponsors".to_string(),
            sponsors: Vec::new(),
        }),
        SectionKind::CallToAction => SectionData::CallToAction(CallToActionData {
            heading: "Ready to run?".to_string(),
            body: None,
            button_label: "Sign up".to_string(),
            button_link: "/join".to_string(),
        }),
        other => SectionData::empty(other),
    }
}

/// The default homepage layout
pub fn default_homepage(homepage_id: HomepageId) -> Vec<Section> {
    let layout = [
        SectionKind::Hero,
        SectionKind::Countdown,
        SectionKind::About,
        SectionKind::Events,
        SectionKind::News,
        SectionKind::Sponsors,
    ];

    layout
        .into_iter()
        .zip(SectionOrder::sequence(layout.len()))
        .map(|(kind, order)| {
            Section::with_data(kind.label(), starter_data(kind), order).on_homepage(homepage_id)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
