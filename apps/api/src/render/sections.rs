//! Section builders shared by every variant.
//!
//! Each list section is produced here and only here, one `Entry` per record in
//! list order, so variants can rearrange sections but never drop or reorder
//! entries. Variants pick classes through `Style`.

use crate::models::{Document, Education, Experience, Language, ListEntry, Skill};
use crate::render::layout::{LayoutNode, SectionKey};
use crate::render::Direction;

const BULLET_MARKER: &str = "- ";
const CONTACT_SEPARATOR: &str = "•";

// ────────────────────────────────────────────────────────────────────────────
// Labels
// ────────────────────────────────────────────────────────────────────────────

/// Section headings in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub contact: &'static str,
    pub summary: &'static str,
    pub experience: &'static str,
    pub education: &'static str,
    pub skills: &'static str,
    /// Joins a job title and company on one line.
    pub title_company_joiner: &'static str,
}

pub const ENGLISH_LABELS: Labels = Labels {
    contact: "Contact",
    summary: "Summary",
    experience: "Experience",
    education: "Education",
    skills: "Skills",
    title_company_joiner: "at",
};

pub const URDU_LABELS: Labels = Labels {
    contact: "رابطہ",
    summary: "خلاصہ",
    experience: "تجربہ",
    education: "تعلیم",
    skills: "مہارتیں",
    title_company_joiner: "·",
};

impl Labels {
    pub fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::English => &ENGLISH_LABELS,
            Language::Urdu => &URDU_LABELS,
        }
    }

    pub fn heading(&self, key: SectionKey) -> &'static str {
        match key {
            SectionKey::Contact => self.contact,
            SectionKey::Summary => self.summary,
            SectionKey::Experience => self.experience,
            SectionKey::Education => self.education,
            SectionKey::Skills => self.skills,
        }
    }
}

/// Direction and headings for one render call.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub direction: Direction,
    pub labels: &'a Labels,
}

/// Per-variant class names.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub section: &'static str,
    pub summary: &'static str,
    pub experience_list: &'static str,
    pub education_entry: &'static str,
    pub skill: &'static str,
    /// Title and company share the heading line instead of stacking.
    pub inline_company: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Text normalization
// ────────────────────────────────────────────────────────────────────────────

/// Splits a description into bullet fragments, one per line, with any leading
/// `- ` marker removed. Blank lines produce no item.
pub fn bullets(description: &str) -> Vec<String> {
    description
        .lines()
        .map(str::trim_start)
        .map(|line| line.strip_prefix(BULLET_MARKER).unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `start - end`, collapsing to whichever side is present.
pub fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} - {e}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

fn text(class: &'static str, value: &str) -> LayoutNode {
    LayoutNode::Text {
        class,
        text: value.to_string(),
    }
}

fn heading(level: u8, class: &'static str, value: &str) -> LayoutNode {
    LayoutNode::Heading {
        level,
        class,
        text: value.to_string(),
    }
}

/// A row whose two sides swap places in right-to-left direction. `lead` is the
/// side that reads first (title), `trail` the side that reads last (dates).
pub fn paired_row(direction: Direction, lead: LayoutNode, trail: LayoutNode) -> LayoutNode {
    let children = match direction {
        Direction::Ltr => vec![lead, trail],
        Direction::Rtl => vec![trail, lead],
    };
    LayoutNode::Row {
        class: "entry-head",
        children,
    }
}

fn section(
    key: SectionKey,
    ctx: RenderContext<'_>,
    style: &Style,
    children: Vec<LayoutNode>,
) -> LayoutNode {
    LayoutNode::Section {
        key,
        heading: ctx.labels.heading(key).to_string(),
        class: style.section,
        children,
    }
}

/// One `Entry` per record of `E`'s list, in list order.
fn entries<E, F>(document: &Document, class: &'static str, build: F) -> Vec<LayoutNode>
where
    E: ListEntry,
    F: Fn(&E) -> Vec<LayoutNode>,
{
    E::list(document)
        .iter()
        .map(|entry| LayoutNode::Entry {
            id: entry.id().to_string(),
            class,
            children: build(entry),
        })
        .collect()
}

fn contact_items(document: &Document) -> impl Iterator<Item = &str> {
    let p = &document.personal_info;
    [p.phone.as_str(), p.email.as_str(), p.address.as_str()]
        .into_iter()
        .filter(|item| !item.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Header pieces
// ────────────────────────────────────────────────────────────────────────────

/// Name and professional title.
pub fn identity(
    document: &Document,
    name_class: &'static str,
    title_class: &'static str,
) -> Vec<LayoutNode> {
    vec![
        heading(1, name_class, &document.personal_info.name),
        text(title_class, &document.personal_info.title),
    ]
}

/// Contact details on one line, separated by bullets.
pub fn contact_line(document: &Document) -> LayoutNode {
    let mut children = Vec::new();
    for (i, item) in contact_items(document).enumerate() {
        if i > 0 {
            children.push(text("separator", CONTACT_SEPARATOR));
        }
        children.push(text("contact-item", item));
    }
    LayoutNode::Block {
        class: "contact-line",
        children,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Contact details stacked one per line, as a titled section.
pub fn contact_section(document: &Document, ctx: RenderContext<'_>, style: &Style) -> LayoutNode {
    let children = contact_items(document)
        .map(|item| text("contact-item", item))
        .collect();
    section(SectionKey::Contact, ctx, style, children)
}

pub fn summary_section(document: &Document, ctx: RenderContext<'_>, style: &Style) -> LayoutNode {
    let children = vec![text(style.summary, &document.personal_info.summary)];
    section(SectionKey::Summary, ctx, style, children)
}

pub fn experience_section(
    document: &Document,
    ctx: RenderContext<'_>,
    style: &Style,
) -> LayoutNode {
    let company_class = match ctx.direction {
        Direction::Ltr => "company align-left",
        Direction::Rtl => "company align-right",
    };

    let items = entries::<Experience, _>(document, "experience-entry", |exp| {
        let dates = text("dates", &date_range(&exp.start_date, &exp.end_date));
        let mut children = Vec::with_capacity(3);

        if style.inline_company {
            let title = LayoutNode::Block {
                class: "title-group",
                children: vec![
                    heading(3, "entry-title", &exp.job_title),
                    text("joiner", ctx.labels.title_company_joiner),
                    text("company", &exp.company),
                ],
            };
            children.push(paired_row(ctx.direction, title, dates));
        } else {
            children.push(paired_row(
                ctx.direction,
                heading(3, "entry-title", &exp.job_title),
                dates,
            ));
            children.push(text(company_class, &exp.company));
        }

        children.push(LayoutNode::BulletList {
            class: "bullets",
            items: bullets(&exp.description),
        });
        children
    });

    let list = LayoutNode::Block {
        class: style.experience_list,
        children: items,
    };
    section(SectionKey::Experience, ctx, style, vec![list])
}

pub fn education_section(
    document: &Document,
    ctx: RenderContext<'_>,
    style: &Style,
) -> LayoutNode {
    let items = entries::<Education, _>(document, style.education_entry, |edu| {
        let degree = LayoutNode::Block {
            class: "degree-group",
            children: vec![
                heading(3, "entry-title", &edu.degree),
                text("institution", &edu.institution),
            ],
        };
        vec![paired_row(ctx.direction, degree, text("dates", &edu.grad_year))]
    });
    section(SectionKey::Education, ctx, style, items)
}

pub fn skills_section(document: &Document, ctx: RenderContext<'_>, style: &Style) -> LayoutNode {
    let chips = entries::<Skill, _>(document, style.skill, |skill| {
        vec![text("skill-name", &skill.name)]
    });
    let list = LayoutNode::Block {
        class: "skill-list",
        children: chips,
    };
    section(SectionKey::Skills, ctx, style, vec![list])
}
