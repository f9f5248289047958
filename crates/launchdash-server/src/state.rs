//! Shared handler state.

use std::sync::Arc;

use launchdash_core::{CallbackRegistry, DashConfig, DashboardLayout, LaunchTable, Result};

use crate::page;

/// State shared by all handlers.
///
/// Everything is built once at startup and read-only afterwards; cloning
/// only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    /// Launch records.
    pub table: Arc<LaunchTable>,
    /// Page component tree.
    pub layout: Arc<DashboardLayout>,
    /// Callback graph.
    pub callbacks: Arc<CallbackRegistry>,
    /// Pre-rendered dashboard HTML.
    pub page: Arc<String>,
}

impl AppState {
    /// Build the layout, callbacks, and page for a loaded table.
    pub fn new(table: LaunchTable, config: &DashConfig) -> Result<Self> {
        let layout = DashboardLayout::build(&table, config)?;
        let callbacks = CallbackRegistry::dashboard();
        let page = page::render_page(&layout);
        Ok(Self {
            table: Arc::new(table),
            layout: Arc::new(layout),
            callbacks: Arc::new(callbacks),
            page: Arc::new(page),
        })
    }
}
