//! Fixed page chrome: the navigation bar above the sections and the footer
//! below them.

use dioxus::prelude::*;

/// One entry of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Site-wide text around the sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteChrome {
    pub site_name: String,
    pub nav: Vec<NavLink>,
    pub footer_note: String,
}

impl Default for SiteChrome {
    fn default() -> Self {
        Self {
            site_name: "Student Marathon Club".to_string(),
            nav: vec![
                NavLink::new("Home", "/"),
                NavLink::new("Events", "/events"),
                NavLink::new("News", "/news"),
                NavLink::new("Shop", "/shop"),
            ],
            footer_note: "Run together, finish together.".to_string(),
        }
    }
}

// ============================================================================
// Navbar
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct NavbarProps {
    pub chrome: SiteChrome,
}

#[component]
pub fn Navbar(props: NavbarProps) -> Element {
    let site_name = &props.chrome.site_name;

    rsx! {
        header { class: "navbar",
            a { class: "navbar__brand", href: "/", "{site_name}" }
            nav { class: "navbar__links",
                for link in props.chrome.nav.iter() {
                    a { key: "{link.href}", class: "navbar__link", href: "{link.href}", "{link.label}" }
                }
            }
        }
    }
}

// ============================================================================
// Footer
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct FooterProps {
    pub chrome: SiteChrome,
}

#[component]
pub fn Footer(props: FooterProps) -> Element {
    let site_name = &props.chrome.site_name;
    let note = &props.chrome.footer_note;

    rsx! {
        footer { class: "footer",
            p { class: "footer__name", "{site_name}" }
            p { class: "footer__note", "{note}" }
        }
    }
}
