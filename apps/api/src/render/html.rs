//! HTML serialization of a rendered layout.
//!
//! `fragment` produces the preview element (`<div id="resume-preview" dir=…>`);
//! `page` wraps it in a standalone document with the variant's stylesheet
//! inlined, which is what the exporter ships. Both are minijinja templates
//! with HTML auto-escaping; the layout tree is walked by a recursive loop.

use minijinja::{context, Environment, Error, UndefinedBehavior};

use crate::render::{RenderedDocument, Variant};

const FRAGMENT_TEMPLATE: &str = r#"<div id="{{ handle }}" class="resume variant-{{ variant }}" dir="{{ direction }}">
{%- for node in [root] recursive -%}
{%- if node.kind == "section" -%}
<section class="{{ node.class }}" data-section="{{ node.key }}"><h2 class="section-heading">{{ node.heading }}</h2>{{ loop(node.children) }}</section>
{%- elif node.kind == "entry" -%}
<div class="{{ node.class }}" data-id="{{ node.id }}">{{ loop(node.children) }}</div>
{%- elif node.kind == "row" -%}
<div class="row {{ node.class }}">{{ loop(node.children) }}</div>
{%- elif node.kind == "block" -%}
<div class="{{ node.class }}">{{ loop(node.children) }}</div>
{%- elif node.kind == "heading" -%}
<h{{ node.level }} class="{{ node.class }}">{{ node.text }}</h{{ node.level }}>
{%- elif node.kind == "text" -%}
<p class="{{ node.class }}">{{ node.text }}</p>
{%- elif node.kind == "bulletList" -%}
<ul class="{{ node.class }}">{% for item in node.items %}<li>{{ item }}</li>{% endfor %}</ul>
{%- elif node.kind == "rule" -%}
<hr class="{{ node.class }}">
{%- endif -%}
{%- endfor -%}
</div>"#;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html dir="{{ direction }}">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>{{ css|safe }}</style>
</head>
<body>
{% include "fragment.html" %}
</body>
</html>
"#;

const BASE_CSS: &str = r#"
.resume { background: #fff; color: #1f2937; font-family: system-ui, sans-serif; width: 210mm; min-height: 297mm; box-sizing: border-box; overflow: hidden; }
.resume[dir="rtl"] { font-family: "Noto Nastaliq Urdu", serif; }
.resume h1, .resume h2, .resume h3, .resume p { margin: 0; }
.entry-head { display: flex; justify-content: space-between; align-items: baseline; }
.contact-line { display: flex; justify-content: center; gap: 1rem; font-size: 0.875rem; color: #6b7280; margin-top: 0.75rem; }
.bullets { list-style: disc; padding-inline-start: 1.25rem; margin: 0.25rem 0 0; font-size: 0.875rem; }
.dates { font-size: 0.875rem; color: #6b7280; }
.company { font-style: italic; color: #4b5563; }
.align-left { text-align: left; }
.align-right { text-align: right; }
.skill-list { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.skill-chip { font-size: 0.875rem; font-weight: 500; padding: 0.25rem 0.75rem; }
.section { margin-bottom: 1.5rem; }
.summary { font-size: 0.875rem; line-height: 1.6; }
"#;

const MODERN_CSS: &str = r#"
.layout-modern { padding: 3rem; }
.layout-modern .header-ruled { text-align: center; border-bottom: 2px solid #15803d; padding-bottom: 1rem; margin-bottom: 1.5rem; }
.layout-modern .name { font-size: 2.25rem; color: #166534; letter-spacing: 0.05em; }
.section-underlined > h2 { color: #15803d; border-bottom: 1px solid #d1d5db; padding-bottom: 0.25rem; margin-bottom: 0.5rem; }
.skill-chip-round { background: #dcfce7; color: #166534; border-radius: 9999px; }
"#;

const CORPORATE_CSS: &str = r#"
.layout-corporate { display: flex; min-height: 297mm; }
.sidebar { width: 33%; background: #1f2937; color: #fff; padding: 1.5rem; }
.sidebar .identity { text-align: center; margin-bottom: 2rem; }
.sidebar .title { color: #d1d5db; }
.section-sidebar > h2 { color: #4ade80; border-bottom: 1px solid #4b5563; padding-bottom: 0.25rem; margin-bottom: 0.5rem; font-size: 1.125rem; }
.section-sidebar .contact-item { font-size: 0.875rem; color: #e5e7eb; }
.skill-chip-dark { background: #374151; color: #86efac; border-radius: 0.25rem; font-size: 0.75rem; }
.body { width: 67%; padding: 2rem; }
.body .section-underlined > h2 { color: #1f2937; border-bottom: 2px solid #d1d5db; }
"#;

const CREATIVE_CSS: &str = r#"
.layout-creative { padding: 2rem; }
.header-centered { text-align: center; margin-bottom: 2rem; }
.banner { background: #dcfce7; padding: 1.5rem; }
.name-serif { font-family: Georgia, serif; font-size: 3rem; color: #166534; }
.section-spaced > h2 { color: #15803d; text-transform: uppercase; letter-spacing: 0.1em; margin-bottom: 0.75rem; }
.centered { text-align: center; max-width: 42rem; margin: 0 auto; }
.divider { border: 0; border-top: 2px solid #dcfce7; margin: 1.5rem 0; }
.timeline { border-inline-start: 2px solid #bbf7d0; padding-inline-start: 1rem; }
.title-group { display: flex; gap: 0.35rem; align-items: baseline; }
.ruled { border-bottom: 1px solid #f3f4f6; padding: 0.5rem 0; }
.skill-chip-square { background: #e5e7eb; border-radius: 0.25rem; padding: 0.25rem 1rem; }
"#;

/// Base rules plus the rules of one variant.
pub fn stylesheet(variant: Variant) -> String {
    let variant_css = match variant {
        Variant::Modern => MODERN_CSS,
        Variant::Corporate => CORPORATE_CSS,
        Variant::Creative => CREATIVE_CSS,
    };
    format!("{BASE_CSS}{variant_css}")
}

fn environment() -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.add_template("fragment.html", FRAGMENT_TEMPLATE)?;
    env.add_template("page.html", PAGE_TEMPLATE)?;
    Ok(env)
}

fn render_template(
    name: &str,
    rendered: &RenderedDocument,
    title: &str,
) -> Result<String, Error> {
    let env = environment()?;
    env.get_template(name)?.render(context! {
        handle => rendered.handle,
        variant => rendered.variant.as_str(),
        direction => rendered.direction.as_str(),
        root => &rendered.root,
        title => title,
        css => stylesheet(rendered.variant),
    })
}

/// The preview element alone.
pub fn fragment(rendered: &RenderedDocument) -> Result<String, Error> {
    render_template("fragment.html", rendered, "")
}

/// A standalone HTML document containing the preview and its stylesheet.
pub fn page(rendered: &RenderedDocument, title: &str) -> Result<String, Error> {
    render_template("page.html", rendered, title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, Language};
    use crate::render::{render, render_localized, Direction};

    #[test]
    fn test_fragment_exposes_preview_handle_and_direction() {
        let html = fragment(&render_localized(
            &Document::seed(),
            Variant::Modern,
            Language::Urdu,
        ))
        .unwrap();

        assert!(html.starts_with(r#"<div id="resume-preview" class="resume variant-modern" dir="rtl">"#));
        assert!(html.contains(r#"data-section="experience""#));
        assert!(html.contains(r#"data-id="exp1""#));
        assert!(html.contains("<li>Developed and maintained user interfaces for client projects using React.</li>"));
        assert!(!html.contains("<li>- "));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut doc = Document::seed();
        doc.personal_info.name = "<script>alert(1)</script>".to_string();

        doc.skills[0].name = r#"C++ & "Rust""#.to_string();

        let html = fragment(&render(&doc, Variant::Corporate, Direction::Ltr)).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("C++ &amp; &quot;Rust&quot;"));
    }

    #[test]
    fn test_page_inlines_variant_stylesheet() {
        let html = page(
            &render(&Document::seed(), Variant::Creative, Direction::Ltr),
            "SmartCV",
        )
        .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html dir="ltr">"#));
        assert!(html.contains(".layout-creative"));
        assert!(!html.contains(".layout-corporate"));
        assert!(html.contains("<title>SmartCV</title>"));
        // Stylesheet text is inserted verbatim.
        assert!(html.contains(r#".resume[dir="rtl"]"#));
        assert!(html.contains(r#"<div id="resume-preview" class="resume variant-creative" dir="ltr">"#));
    }

    #[test]
    fn test_every_node_kind_is_emitted() {
        let html = fragment(&render(&Document::seed(), Variant::Creative, Direction::Ltr)).unwrap();

        assert!(html.contains(r#"<h1 class="#));
        assert!(html.contains(r#"<hr class="divider">"#));
        assert!(html.contains(r#"<div class="row entry-head">"#));
        assert!(html.contains(r#"<ul class="bullets"><li>"#));
        assert!(html.contains(r#"data-section="skills""#));
        assert!(html.contains(r#"data-id="skill5""#));
    }
}
