//! Single-column flowing layout: centered header, then every section in order.

use crate::models::Document;
use crate::render::layout::LayoutNode;
use crate::render::sections::{self, RenderContext, Style};
use crate::render::LayoutStrategy;

const STYLE: Style = Style {
    section: "section section-underlined",
    summary: "summary",
    experience_list: "experience-list",
    education_entry: "education-entry",
    skill: "skill-chip skill-chip-round",
    inline_company: false,
};

pub struct Modern;

impl LayoutStrategy for Modern {
    fn compose(&self, document: &Document, ctx: RenderContext<'_>) -> LayoutNode {
        let mut header = sections::identity(document, "name", "title");
        header.push(sections::contact_line(document));

        LayoutNode::Block {
            class: "layout-modern",
            children: vec![
                LayoutNode::Block {
                    class: "header header-ruled",
                    children: header,
                },
                LayoutNode::Block {
                    class: "main",
                    children: vec![
                        sections::summary_section(document, ctx, &STYLE),
                        sections::experience_section(document, ctx, &STYLE),
                        sections::education_section(document, ctx, &STYLE),
                        sections::skills_section(document, ctx, &STYLE),
                    ],
                },
            ],
        }
    }
}
