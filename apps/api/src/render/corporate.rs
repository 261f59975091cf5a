//! Two-column layout. The sidebar carries identity, contact and skills; the
//! body carries summary, experience and education.

use crate::models::Document;
use crate::render::layout::LayoutNode;
use crate::render::sections::{self, RenderContext, Style};
use crate::render::LayoutStrategy;

const SIDEBAR_STYLE: Style = Style {
    section: "section section-sidebar",
    summary: "summary",
    experience_list: "experience-list",
    education_entry: "education-entry",
    skill: "skill-chip skill-chip-dark",
    inline_company: false,
};

const BODY_STYLE: Style = Style {
    section: "section section-underlined",
    ..SIDEBAR_STYLE
};

pub struct Corporate;

impl LayoutStrategy for Corporate {
    fn compose(&self, document: &Document, ctx: RenderContext<'_>) -> LayoutNode {
        let sidebar = LayoutNode::Block {
            class: "sidebar",
            children: vec![
                LayoutNode::Block {
                    class: "identity",
                    children: sections::identity(document, "name", "title"),
                },
                sections::contact_section(document, ctx, &SIDEBAR_STYLE),
                sections::skills_section(document, ctx, &SIDEBAR_STYLE),
            ],
        };

        let body = LayoutNode::Block {
            class: "body",
            children: vec![
                sections::summary_section(document, ctx, &BODY_STYLE),
                sections::experience_section(document, ctx, &BODY_STYLE),
                sections::education_section(document, ctx, &BODY_STYLE),
            ],
        };

        LayoutNode::Block {
            class: "layout-corporate",
            children: vec![sidebar, body],
        }
    }
}
