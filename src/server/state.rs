//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::printer::PageProfile;
use crate::render::PrintRenderer;
use crate::template::{JsonFileStore, MemoryStore, TemplateStore};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// JSON file holding the active template. `None` keeps it in memory.
    pub store_path: Option<PathBuf>,
    /// Physical page the forms are printed on
    pub page: PageProfile,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            store_path: None,
            page: PageProfile::default(),
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub store: Arc<dyn TemplateStore>,
    pub renderer: PrintRenderer,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store: Arc<dyn TemplateStore> = match &config.store_path {
            Some(path) => Arc::new(JsonFileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn TemplateStore>) -> Self {
        Self {
            store,
            renderer: PrintRenderer::new(config.page),
        }
    }
}
