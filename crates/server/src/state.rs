//! Shared application state

use std::sync::Arc;

use homestretch_render::{HomepageRenderer, SiteChrome};

use crate::config::ServerConfig;
use crate::store::SectionStore;

/// Handed to every handler; cheap to clone
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: SectionStore,
    pub config: Arc<ServerConfig>,
    pub renderer: Arc<HomepageRenderer>,
}

impl AppState {
    pub fn new(store: SectionStore, config: ServerConfig) -> Self {
        let mut chrome = SiteChrome::default();
        if let Some(site_name) = &config.site_name {
            chrome.site_name = site_name.clone();
        }

        Self {
            store,
            config: Arc::new(config),
            renderer: Arc::new(HomepageRenderer::default().with_chrome(chrome)),
        }
    }
}
