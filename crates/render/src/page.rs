//! Homepage rendering
//!
//! [`HomepageRenderer`] is what the server and the CLI use: it plans a
//! section list for a mode and draws the plan into a complete HTML
//! document. The public page and the admin preview go through the same
//! code and differ only in the [`RenderMode`].

use dioxus::prelude::*;
use homestretch_sections::Section;

use crate::components::{HomePage, SiteChrome};
use crate::plan::{PlannedSection, RenderMode, plan};
use crate::registry::SectionRegistry;

/// Renders section lists to HTML
#[derive(Debug, Clone, PartialEq)]
pub struct HomepageRenderer {
    registry: SectionRegistry,
    chrome: SiteChrome,
}

impl Default for HomepageRenderer {
    fn default() -> Self {
        Self::new(SectionRegistry::default(), SiteChrome::default())
    }
}

impl HomepageRenderer {
    pub fn new(registry: SectionRegistry, chrome: SiteChrome) -> Self {
        Self { registry, chrome }
    }

    /// Same registry, different chrome
    pub fn with_chrome(mut self, chrome: SiteChrome) -> Self {
        self.chrome = chrome;
        self
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn chrome(&self) -> &SiteChrome {
        &self.chrome
    }

    /// The plan a render of `sections` would draw
    pub fn plan(&self, sections: &[Section], mode: RenderMode) -> Vec<PlannedSection> {
        plan(&self.registry, sections, mode)
    }

    /// The page body (chrome and sections) without the document shell
    pub fn render_body(&self, sections: &[Section], mode: RenderMode) -> String {
        let planned = self.plan(sections, mode);
        tracing::debug!(count = planned.len(), ?mode, "rendering homepage");

        dioxus_ssr::render_element(rsx! {
            HomePage {
                chrome: self.chrome.clone(),
                sections: planned,
                preview: mode.is_preview(),
            }
        })
    }

    /// The document `<head>`: charset, viewport, title and, for the
    /// preview, `noindex`
    pub fn render_head(&self, mode: RenderMode) -> String {
        let title = match mode {
            RenderMode::Public => self.chrome.site_name.clone(),
            RenderMode::Preview => format!("Preview | {}", self.chrome.site_name),
        };

        dioxus_ssr::render_element(rsx! {
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                if mode.is_preview() {
                    meta { name: "robots", content: "noindex" }
                }
                title { "{title}" }
            }
        })
    }

    /// A full HTML document
    pub fn render(&self, sections: &[Section], mode: RenderMode) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n{head}\n<body>\n{body}\n</body>\n</html>\n",
            head = self.render_head(mode),
            body = self.render_body(sections, mode),
        )
    }

    /// The public homepage
    pub fn render_public(&self, sections: &[Section]) -> String {
        self.render(sections, RenderMode::Public)
    }

    /// The admin live preview
    pub fn render_preview(&self, sections: &[Section]) -> String {
        self.render(sections, RenderMode::Preview)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use homestretch_sections::{DEFAULT_COUNTDOWN_DATE, SectionData, SectionKind};
    use serde_json::json;

    /// Section ids in the order they appear in the markup
    fn rendered_ids(html: &str, sections: &[Section]) -> Vec<String> {
        let mut found: Vec<(usize, String)> = sections
            .iter()
            .filter_map(|s| {
                let marker = format!("data-section-id=\"{}\"", s.id);
                html.find(&marker).map(|at| (at, s.name.clone()))
            })
            .collect();
        found.sort();
        found.into_iter().map(|(_, name)| name).collect()
    }

    fn pair() -> Vec<Section> {
        vec![
            Section::new("a", SectionKind::About, 2.into()),
            Section::new("b", SectionKind::About, 1.into()).enabled(false),
        ]
    }

    #[test]
    fn test_public_page_excludes_disabled() {
        let sections = pair();
        let html = HomepageRenderer::default().render_public(&sections);

        assert_eq!(rendered_ids(&html, &sections), vec!["a"]);
        assert!(!html.contains("data-disabled"));
    }

    #[test]
    fn test_preview_marks_disabled() {
        let sections = pair();
        let html = HomepageRenderer::default().render_preview(&sections);

        assert_eq!(rendered_ids(&html, &sections), vec!["b", "a"]);
        let marker = format!("data-section-id=\"{}\"", sections[1].id);
        let frame_start = html.find(&marker).unwrap();
        let frame_tag_end = frame_start + html[frame_start..].find('>').unwrap();
        let frame_open = &html[..frame_tag_end];
        let tag_start = frame_open.rfind("<section").unwrap();
        assert!(frame_open[tag_start..].contains("data-disabled=\"true\""));
        assert!(html.contains("noindex"));
    }

    #[test]
    fn test_render_order_follows_order_field() {
        let mut sections = vec![
            Section::new("third", SectionKind::News, 30.into()),
            Section::new("first", SectionKind::Hero, 1.into()),
            Section::new("second", SectionKind::Sponsors, 2.into()),
        ];
        let renderer = HomepageRenderer::default();

        let html = renderer.render_public(&sections);
        assert_eq!(rendered_ids(&html, &sections), vec!["first", "second", "third"]);

        sections.reverse();
        assert_eq!(renderer.render_public(&sections), html);
    }

    #[test]
    fn test_sections_sit_between_chrome() {
        let sections = vec![Section::new("Hero", SectionKind::Hero, 1.into())];
        let html = HomepageRenderer::default().render_public(&sections);

        let navbar = html.find("class=\"navbar\"").unwrap();
        let section = html.find("data-section-id").unwrap();
        let footer = html.find("class=\"footer\"").unwrap();
        assert!(navbar < section && section < footer);
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_unknown_component_renders_placeholder() {
        let data = SectionData::from_parts("MysterySection", json!(null)).unwrap();
        let sections = vec![Section::with_data("Mystery", data, 1.into())];
        let html = HomepageRenderer::default().render_public(&sections);

        assert!(html.contains("Component not found: MysterySection"));
    }

    #[test]
    fn test_countdown_default_date_rendered() {
        let data = SectionData::from_parts("CountdownTimer", json!({})).unwrap();
        let sections = vec![Section::with_data("Countdown", data, 1.into())];
        let html = HomepageRenderer::default().render_public(&sections);

        assert!(html.contains(&format!("data-target=\"{DEFAULT_COUNTDOWN_DATE}\"")));
    }

    #[test]
    fn test_payload_reaches_component() {
        let data = SectionData::from_parts(
            "HeroSection",
            json!({"title": "Race Day 2026", "backgroundImage": "/uploads/hero.png"}),
        )
        .unwrap();
        let sections = vec![Section::with_data("Hero", data, 1.into())];
        let html = HomepageRenderer::default().render_public(&sections);

        assert!(html.contains("Race Day 2026"));
        assert!(html.contains("/uploads/hero.png"));
    }

    #[test]
    fn test_text_is_escaped() {
        let data = SectionData::from_parts("AboutSection", json!({"heading": "<script>x</script>"}))
            .unwrap();
        let sections = vec![Section::with_data("About", data, 1.into())];
        let html = HomepageRenderer::default().render_public(&sections);

        assert!(!html.contains("<script>x</script>"));
    }

    #[test]
    fn test_empty_homepage_still_has_chrome() {
        let html = HomepageRenderer::default().render_public(&[]);
        assert!(html.contains("Student Marathon Club"));
        assert!(!html.contains("data-section-id"));
    }

    #[test]
    fn test_title_is_escaped() {
        let chrome = SiteChrome {
            site_name: "Tom & Jerry <3".to_string(),
            ..SiteChrome::default()
        };
        let renderer = HomepageRenderer::default().with_chrome(chrome);
        let head = renderer.render_head(RenderMode::Preview);

        assert!(head.contains("<title>"));
        assert!(head.contains("Preview | Tom &amp; Jerry"));
        assert!(!head.contains("<3"));
        assert!(head.contains("noindex"));
        assert!(!renderer.render_head(RenderMode::Public).contains("noindex"));
    }
}
