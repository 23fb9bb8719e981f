use std::collections::{HashMap, HashSet};

use ammonia::Builder;
use pulldown_cmark::{Event, Options, Parser, html};

/// Converts Markdown source to sanitized HTML.
///
/// GitHub-flavored rendering with soft line breaks promoted to hard breaks,
/// followed by an allow-list sanitization pass. Anything not on the
/// allow-list is discarded, not escaped; `<script>` bodies are dropped
/// entirely.
///
/// # Arguments
///
/// * `content` - The raw Markdown source.
///
/// # Returns
///
/// Sanitized HTML safe to emit into a page unescaped.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut raw_html = String::new();
    html::push_html(&mut raw_html, parser);

    sanitize(&raw_html)
}

/// Strips the rendered HTML down to the allowed tag/attribute/scheme set.
fn sanitize(raw_html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "h1", "h2", "h3", "ul", "ol", "li", "blockquote", "code", "pre", "span", "img",
        "a", "br",
    ]
    .into_iter()
    .collect();

    let mut tag_attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    tag_attributes.insert("img", ["src", "alt", "title"].into_iter().collect());
    tag_attributes.insert("a", ["href", "title", "target", "rel"].into_iter().collect());
    tag_attributes.insert("code", ["class"].into_iter().collect());
    tag_attributes.insert("pre", ["class"].into_iter().collect());
    tag_attributes.insert("span", ["class"].into_iter().collect());

    Builder::default()
        .tags(tags)
        .generic_attributes(HashSet::new())
        .tag_attributes(tag_attributes)
        .url_schemes(["http", "https", "mailto"].into_iter().collect())
        // `rel` is allow-listed on <a>, so ammonia must not manage it.
        .link_rel(None)
        .clean(raw_html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_paragraphs() {
        let html = render_markdown("# Hi\n\nhello *world*");
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("hello"));
        assert!(html.contains("world"));
    }

    #[test]
    fn strips_script_tags_entirely() {
        let html = render_markdown("# Hi\n<script>alert(1)</script>");
        assert!(!html.contains("script"));
        assert!(!html.contains("alert(1)"));
        assert!(html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn strips_event_handler_attributes() {
        let html = render_markdown("<img src=x onerror=alert(1)>");
        assert!(!html.contains("onerror"));
        assert!(!html.contains("on*"));
    }

    #[test]
    fn rejects_javascript_scheme_links() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn keeps_mailto_links() {
        let html = render_markdown("[mail](mailto:admin@example.com)");
        assert!(html.contains("mailto:admin@example.com"));
    }

    #[test]
    fn soft_breaks_become_line_breaks() {
        let html = render_markdown("one\ntwo");
        assert!(html.contains("<br"));
    }

    #[test]
    fn discards_disallowed_tags_but_keeps_text() {
        let html = render_markdown("<table><tr><td>cell</td></tr></table>");
        assert!(!html.contains("<table"));
        assert!(html.contains("cell"));
    }

    #[test]
    fn keeps_code_blocks_with_language_class() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("<code"));
        assert!(html.contains("fn main"));
    }
}
