//! Layout tree produced by every variant.
//!
//! Nodes carry presentation classes but never styling decisions about data:
//! every field value sits in exactly one node, and list entries keep the `id`
//! of the record they were built from.

use serde::Serialize;

/// Logical sections a layout may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
}

impl SectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Contact => "contact",
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutNode {
    /// Generic grouping (header, sidebar, body, column).
    Block {
        class: &'static str,
        children: Vec<LayoutNode>,
    },
    Section {
        key: SectionKey,
        heading: String,
        class: &'static str,
        children: Vec<LayoutNode>,
    },
    /// One list record; `id` is the record's entry id.
    Entry {
        id: String,
        class: &'static str,
        children: Vec<LayoutNode>,
    },
    /// Horizontally paired content. Children are already in visual order.
    Row {
        class: &'static str,
        children: Vec<LayoutNode>,
    },
    Heading {
        level: u8,
        class: &'static str,
        text: String,
    },
    Text {
        class: &'static str,
        text: String,
    },
    /// Each item is one bullet fragment without its marker.
    BulletList {
        class: &'static str,
        items: Vec<String>,
    },
    Rule {
        class: &'static str,
    },
}

impl LayoutNode {
    pub fn children(&self) -> &[LayoutNode] {
        match self {
            LayoutNode::Block { children, .. }
            | LayoutNode::Section { children, .. }
            | LayoutNode::Entry { children, .. }
            | LayoutNode::Row { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first search for the first section with `key`.
    pub fn find_section(&self, key: SectionKey) -> Option<&LayoutNode> {
        if let LayoutNode::Section { key: k, .. } = self {
            if *k == key {
                return Some(self);
            }
        }
        self.children().iter().find_map(|c| c.find_section(key))
    }

    /// Ids of every `Entry` below this node, in document order.
    pub fn entry_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_entry_ids(&mut out);
        out
    }

    fn collect_entry_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let LayoutNode::Entry { id, .. } = self {
            out.push(id.as_str());
        }
        for child in self.children() {
            child.collect_entry_ids(out);
        }
    }

    /// Every piece of displayed text below this node, in visual order.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            LayoutNode::Section { heading, .. } => out.push(heading.as_str()),
            LayoutNode::Heading { text, .. } | LayoutNode::Text { text, .. } => {
                out.push(text.as_str())
            }
            LayoutNode::BulletList { items, .. } => out.extend(items.iter().map(String::as_str)),
            _ => {}
        }
        for child in self.children() {
            child.collect_texts(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(t: &str) -> LayoutNode {
        LayoutNode::Text {
            class: "t",
            text: t.to_string(),
        }
    }

    #[test]
    fn test_find_section_and_entry_ids() {
        let tree = LayoutNode::Block {
            class: "root",
            children: vec![LayoutNode::Block {
                class: "body",
                children: vec![LayoutNode::Section {
                    key: SectionKey::Skills,
                    heading: "Skills".to_string(),
                    class: "section",
                    children: vec![
                        LayoutNode::Entry {
                            id: "s1".to_string(),
                            class: "skill",
                            children: vec![text("Rust")],
                        },
                        LayoutNode::Entry {
                            id: "s2".to_string(),
                            class: "skill",
                            children: vec![text("Go")],
                        },
                    ],
                }],
            }],
        };

        let skills = tree.find_section(SectionKey::Skills).unwrap();
        assert_eq!(skills.entry_ids(), vec!["s1", "s2"]);
        assert_eq!(skills.texts(), vec!["Skills", "Rust", "Go"]);
        assert!(tree.find_section(SectionKey::Summary).is_none());
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(LayoutNode::Rule { class: "rule" }).unwrap();
        assert_eq!(json["kind"], "rule");
        assert_eq!(json["class"], "rule");

        let json = serde_json::to_value(LayoutNode::BulletList {
            class: "bullets",
            items: vec!["A".to_string()],
        })
        .unwrap();
        assert_eq!(json["kind"], "bulletList");
    }
}
