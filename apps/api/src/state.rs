use std::sync::Arc;

use crate::export::Exporter;
use crate::workspace::Workspace;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single editing session: document, language, variant, saves.
    pub workspace: Arc<Workspace>,
    /// Produces the downloadable artifact. Default: `HtmlExporter`.
    pub exporter: Arc<dyn Exporter>,
}
