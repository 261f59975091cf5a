//! Exporter: turns a rendered layout into a downloadable artifact.
//!
//! The exporter only relies on the preview handle of a `RenderedDocument`.
//! `HtmlExporter` ships a standalone page; rasterizing that page to PDF is left
//! to the client.

use thiserror::Error;

use crate::render::{html, RenderedDocument, PREVIEW_ROOT_ID};

pub const EXPORT_FILE_STEM: &str = "SmartCV";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rendered output has no '{expected}' handle (found '{found}')")]
    MissingHandle {
        expected: &'static str,
        found: String,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub trait Exporter: Send + Sync {
    fn export(&self, rendered: &RenderedDocument) -> Result<ExportArtifact, ExportError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlExporter;

impl Exporter for HtmlExporter {
    fn export(&self, rendered: &RenderedDocument) -> Result<ExportArtifact, ExportError> {
        if rendered.handle != PREVIEW_ROOT_ID {
            return Err(ExportError::MissingHandle {
                expected: PREVIEW_ROOT_ID,
                found: rendered.handle.to_string(),
            });
        }

        Ok(ExportArtifact {
            file_name: format!("{EXPORT_FILE_STEM}.html"),
            content_type: "text/html; charset=utf-8",
            bytes: html::page(rendered, EXPORT_FILE_STEM)?.into_bytes(),
        })
    }
}
