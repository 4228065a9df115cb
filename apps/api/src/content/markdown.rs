//! Markdown → HTML for resume content and generated cover letters.

use std::rc::Rc;

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use pulldown_cmark_escape::{escape_href, escape_html};

use crate::content::document::split_sections;
use crate::visibility::{
    AnimatedSection, Animation, IntersectionBackend, NodeId, ObserverOptions, UnsupportedBackend,
};

const SECTION_CLASS: &str = "markdown-section";
const SECTION_THRESHOLD: f64 = 0.1;
const SECTION_DELAY_STEP_MS: u32 = 100;

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Opening tag for an external link. Escaping matches what pulldown-cmark
/// applies to the links it renders itself.
fn external_anchor(dest_url: &str, title: &str) -> String {
    let mut tag = String::from("<a href=\"");
    // Writes into a String never fail.
    let _ = escape_href(&mut tag, dest_url);
    tag.push('"');
    if !title.is_empty() {
        tag.push_str(" title=\"");
        let _ = escape_html(&mut tag, title);
        tag.push('"');
    }
    tag.push_str(" target=\"_blank\" rel=\"noopener noreferrer\">");
    tag
}

/// Renders GitHub-flavoured markdown. External links open in a new tab.
pub fn render_markdown(markdown: &str) -> String {
    let mut external_stack: Vec<bool> = Vec::new();

    let events = Parser::new_ext(markdown, options()).map(|event| match event {
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) if is_external(&dest_url) => {
            external_stack.push(true);
            Event::Html(external_anchor(&dest_url, &title).into())
        }
        Event::Start(tag @ Tag::Link { .. }) => {
            external_stack.push(false);
            Event::Start(tag)
        }
        Event::End(TagEnd::Link) if external_stack.pop() == Some(true) => {
            Event::Html("</a>".into())
        }
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Renders each `## ` section inside an animated `<section>` wrapper.
///
/// This runs on the server, where no viewport exists, so every section is
/// emitted in its hidden first-paint state; the client takes over from there.
pub fn render_animated_sections(markdown: &str) -> String {
    let backend: Rc<dyn IntersectionBackend> = Rc::new(UnsupportedBackend);
    let options = ObserverOptions::builder()
        .threshold(SECTION_THRESHOLD)
        .freeze_once_visible(true)
        .build()
        .unwrap_or_default();

    split_sections(markdown)
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let index = u32::try_from(i).unwrap_or(u32::MAX);
            AnimatedSection::new(
                backend.clone(),
                Some(NodeId(u64::from(index) + 1)),
                options.clone(),
                SECTION_CLASS,
                Animation::FadeInUp,
            )
            .with_delay_ms(index.saturating_mul(SECTION_DELAY_STEP_MS))
            .render(&render_markdown(&section.text))
        })
        .collect()
}
