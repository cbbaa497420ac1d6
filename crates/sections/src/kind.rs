//! Section kinds
//!
//! The closed set of homepage components the site knows how to render.
//! Every kind has a stable component name (the string stored in
//! `Section::component`), a default category tag and a label for the
//! editor.

use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SectionKind
// ============================================================================

/// A homepage component known at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    /// Full-width banner with title, subtitle and call to action
    Hero,
    /// "Who we are" block
    About,
    /// Long-form story with an image and a quote
    Story,
    /// Row of key figures (runners, kilometres, funds raised)
    Stats,
    /// Countdown to race day
    Countdown,
    /// Upcoming events list
    Events,
    /// Latest news posts
    News,
    /// Featured shop products
    Shop,
    /// Sponsor logos
    Sponsors,
    /// Closing call to action
    CallToAction,
}

impl SectionKind {
    /// Every known kind, in the order the editor lists them
    pub const ALL: [SectionKind; 10] = [
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Story,
        SectionKind::Stats,
        SectionKind::Countdown,
        SectionKind::Events,
        SectionKind::News,
        SectionKind::Shop,
        SectionKind::Sponsors,
        SectionKind::CallToAction,
    ];

    /// The component name stored on sections of this kind
    pub fn component_name(&self) -> &'static str {
        match self {
            SectionKind::Hero => "HeroSection",
            SectionKind::About => "AboutSection",
            SectionKind::Story => "StorySection",
            SectionKind::Stats => "StatsSection",
            SectionKind::Countdown => "CountdownTimer",
            SectionKind::Events => "EventsSection",
            SectionKind::News => "NewsSection",
            SectionKind::Shop => "ShopSection",
            SectionKind::Sponsors => "SponsorsSection",
            SectionKind::CallToAction => "CallToAction",
        }
    }

    /// Default `type` tag for new sections of this kind
    pub fn default_type(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Countdown | SectionKind::Events | SectionKind::CallToAction => "feature",
            SectionKind::Shop => "commerce",
            SectionKind::About
            | SectionKind::Story
            | SectionKind::Stats
            | SectionKind::News
            | SectionKind::Sponsors => "content",
        }
    }

    /// Human readable label for the editor
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Hero => "Hero Banner",
            SectionKind::About => "About Us",
            SectionKind::Story => "Our Story",
            SectionKind::Stats => "Stats",
            SectionKind::Countdown => "Race Countdown",
            SectionKind::Events => "Upcoming Events",
            SectionKind::News => "Latest News",
            SectionKind::Shop => "Shop Highlights",
            SectionKind::Sponsors => "Sponsors",
            SectionKind::CallToAction => "Call To Action",
        }
    }

    /// Exact lookup by component name
    pub fn from_component(name: &str) -> Option<SectionKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.component_name() == name)
    }

    /// Lenient lookup for command-line input
    ///
    /// Accepts the exact component name, any casing of it (`hero-section`,
    /// `hero_section`), or the short form without the `Section` suffix
    /// (`hero`, `stats`).
    pub fn parse_loose(input: &str) -> Option<SectionKind> {
        let camel = input.trim().to_upper_camel_case();
        if let Some(kind) = Self::from_component(&camel) {
            return Some(kind);
        }
        Self::from_component(&format!("{camel}Section")).or(match camel.as_str() {
            "Countdown" => Some(SectionKind::Countdown),
            "Cta" => Some(SectionKind::CallToAction),
            _ => None,
        })
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

// ============================================================================
// Tests
// ============================================================================
