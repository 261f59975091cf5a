//! Decorative layout: banner header, centered summary, a rule, then a bordered
//! experience timeline with title and company on one line.

use crate::models::Document;
use crate::render::layout::LayoutNode;
use crate::render::sections::{self, RenderContext, Style};
use crate::render::LayoutStrategy;

const STYLE: Style = Style {
    section: "section section-spaced",
    summary: "summary centered",
    experience_list: "experience-list timeline",
    education_entry: "education-entry ruled",
    skill: "skill-chip skill-chip-square",
    inline_company: true,
};

pub struct Creative;

impl LayoutStrategy for Creative {
    fn compose(&self, document: &Document, ctx: RenderContext<'_>) -> LayoutNode {
        let header = LayoutNode::Block {
            class: "header header-centered",
            children: vec![
                LayoutNode::Block {
                    class: "banner",
                    children: sections::identity(document, "name name-serif", "title"),
                },
                sections::contact_line(document),
            ],
        };

        LayoutNode::Block {
            class: "layout-creative",
            children: vec![
                header,
                LayoutNode::Block {
                    class: "main",
                    children: vec![
                        sections::summary_section(document, ctx, &STYLE),
                        LayoutNode::Rule { class: "divider" },
                        sections::experience_section(document, ctx, &STYLE),
                        sections::education_section(document, ctx, &STYLE),
                        sections::skills_section(document, ctx, &STYLE),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, Direction, SectionKey, Variant};

    #[test]
    fn test_title_and_company_share_the_heading_line() {
        let out = render(&Document::seed(), Variant::Creative, Direction::Ltr);
        let experience = out.section(SectionKey::Experience).unwrap();
        let entry = &experience.children()[0].children()[0];
        let row = &entry.children()[0];

        assert_eq!(
            row.texts(),
            vec!["Frontend Developer", "at", "Tech Solutions Ltd.", "Jan 2022 - Present"]
        );
        // No separate company line below the row.
        assert!(matches!(entry.children()[1], LayoutNode::BulletList { .. }));
    }

    #[test]
    fn test_summary_is_followed_by_a_rule() {
        let out = render(&Document::seed(), Variant::Creative, Direction::Ltr);
        let main = &out.root.children()[1];
        assert!(matches!(main.children()[1], LayoutNode::Rule { .. }));
    }
}
