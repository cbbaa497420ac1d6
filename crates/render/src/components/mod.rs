//! # Page Components
//!
//! Dioxus components the homepage is drawn with. They are rendered to an
//! HTML string on the server; none of them hold state or touch the network.
//!
//! ```text
//! HomePage
//! ├── Navbar
//! ├── SectionFrame (one per planned section)
//! │   └── SectionBody
//! │       ├── HeroSection / AboutSection / ... / CallToAction
//! │       └── ComponentNotFound
//! └── Footer
//! ```

pub mod chrome;
pub mod content;
pub mod countdown;
pub mod frame;
pub mod hero;
pub mod listings;
pub mod placeholder;

pub use chrome::{Footer, Navbar, NavLink, SiteChrome};
pub use content::{AboutSection, CallToAction, StatsSection, StorySection};
pub use countdown::CountdownTimer;
pub use frame::{HomePage, SectionBody, SectionFrame};
pub use hero::HeroSection;
pub use listings::{EventsSection, NewsSection, ShopSection, SponsorsSection};
pub use placeholder::ComponentNotFound;
