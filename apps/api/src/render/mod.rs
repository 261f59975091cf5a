//! Template Renderer: projects one `Document` onto a layout tree.
//!
//! `render(document, variant, direction)` is total: any well-formed document,
//! including one with empty lists and blank fields, produces a complete tree
//! with all four content sections present.
//!
//! Variants only arrange sections; the sections themselves come from the shared
//! builders in `sections`, which is what keeps entry coverage identical across
//! variants. Right-to-left direction swaps the two sides of every paired row
//! (title / dates) and nothing else.

use serde::{Deserialize, Serialize};

use crate::models::{Document, Language};

pub mod corporate;
pub mod creative;
pub mod html;
pub mod layout;
pub mod modern;
pub mod sections;

pub use layout::{LayoutNode, SectionKey};
pub use sections::{Labels, RenderContext};

/// Element id of the rendered preview root, the handle the exporter picks up.
pub const PREVIEW_ROOT_ID: &str = "resume-preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single-column flowing layout.
    #[default]
    Modern,
    /// Sidebar plus body.
    Corporate,
    /// Decorative centered header.
    Creative,
}

impl Variant {
    #[cfg(test)]
    pub const ALL: [Variant; 3] = [Variant::Modern, Variant::Corporate, Variant::Creative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Modern => "modern",
            Variant::Corporate => "corporate",
            Variant::Creative => "creative",
        }
    }

    fn strategy(&self) -> &'static dyn LayoutStrategy {
        match self {
            Variant::Modern => &modern::Modern,
            Variant::Corporate => &corporate::Corporate,
            Variant::Creative => &creative::Creative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn for_language(language: Language) -> Self {
        if language.is_rtl() {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// One layout strategy. Implementations arrange the shared section builders.
pub trait LayoutStrategy: Send + Sync {
    fn compose(&self, document: &Document, ctx: RenderContext<'_>) -> LayoutNode;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    /// Always `PREVIEW_ROOT_ID`.
    pub handle: &'static str,
    pub variant: Variant,
    pub direction: Direction,
    pub root: LayoutNode,
}

impl RenderedDocument {
    pub fn section(&self, key: SectionKey) -> Option<&LayoutNode> {
        self.root.find_section(key)
    }

    /// Number of entries rendered in a section, 0 if the section is absent.
    #[cfg(test)]
    pub fn entry_count(&self, key: SectionKey) -> usize {
        self.section(key).map_or(0, |s| s.entry_ids().len())
    }
}

/// Renders with English headings.
pub fn render(document: &Document, variant: Variant, direction: Direction) -> RenderedDocument {
    render_with(
        document,
        variant,
        RenderContext {
            direction,
            labels: Labels::for_language(Language::English),
        },
    )
}

/// Renders with the direction and headings of `language`.
pub fn render_localized(
    document: &Document,
    variant: Variant,
    language: Language,
) -> RenderedDocument {
    render_with(
        document,
        variant,
        RenderContext {
            direction: language.direction(),
            labels: Labels::for_language(language),
        },
    )
}

pub fn render_with(
    document: &Document,
    variant: Variant,
    ctx: RenderContext<'_>,
) -> RenderedDocument {
    RenderedDocument {
        handle: PREVIEW_ROOT_ID,
        variant,
        direction: ctx.direction,
        root: variant.strategy().compose(document, ctx),
    }
}
