// src/text/html.rs
// =============================================================================
// This module reduces an HTML page to plain text.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever (Mozilla's HTML parser), so broken markup is fine
//
// The output is Markdown-flavoured text, similar to what html2text produces:
// - Headings become "# Title" lines
// - List items become "* item" lines
// - Links become [text](href) with the href kept exactly as written
// - Images become ![alt](src)
// - <head>, <script>, <style> and friends are dropped
//
// Keeping links in [text](href) form matters: the crawler discovers the next
// pages by scanning this text for "(http...)" (see links.rs).
// =============================================================================

use scraper::{ElementRef, Html, Node};

// Elements whose content never shows up in the text
const SKIPPED: &[&str] = &["head", "script", "style", "noscript", "template", "svg"];

// Elements that start and end a paragraph
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "header", "main", "nav", "ol",
    "p", "section", "summary", "table", "tbody", "thead", "tfoot", "tr", "ul",
];

/// Converts raw HTML markup into plain text.
///
/// Example:
///   html = "<h1>Help</h1><p>See <a href='https://a.test/faq'>FAQ</a></p>"
///   result = "# Help\n\nSee [FAQ](https://a.test/faq)"
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = TextBuffer::default();
    render_children(document.root_element(), &mut out, false);
    out.finish()
}

// Walks the children of an element, writing text into `out`
fn render_children(element: ElementRef, out: &mut TextBuffer, preformatted: bool) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if preformatted {
                    out.push_raw(text);
                } else {
                    out.push_text(text);
                }
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    render_element(child_element, out, preformatted);
                }
            }
            // Comments, doctypes and processing instructions carry no text
            _ => {}
        }
    }
}

fn render_element(element: ElementRef, out: &mut TextBuffer, preformatted: bool) {
    let name = element.value().name();

    if SKIPPED.contains(&name) {
        return;
    }

    match name {
        "br" => out.line_break(),
        "hr" => {
            out.block_break();
            out.push_raw("* * *");
            out.block_break();
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            // The level is the digit after the 'h'
            let level = name[1..].parse::<usize>().unwrap_or(1);
            out.block_break();
            out.push_raw(&"#".repeat(level));
            out.push_raw(" ");
            render_children(element, out, preformatted);
            out.block_break();
        }
        "li" => {
            out.start_line();
            out.push_raw("* ");
            render_children(element, out, preformatted);
            out.start_line();
        }
        "pre" => {
            out.block_break();
            render_children(element, out, true);
            out.block_break();
        }
        "a" => render_link(element, out, preformatted),
        "img" => render_image(element, out),
        "td" | "th" => {
            out.push_word("|");
            render_children(element, out, preformatted);
        }
        _ if BLOCKS.contains(&name) => {
            out.block_break();
            render_children(element, out, preformatted);
            out.block_break();
        }
        _ => render_children(element, out, preformatted),
    }
}

// <a href="...">text</a>  ->  [text](href)
fn render_link(element: ElementRef, out: &mut TextBuffer, preformatted: bool) {
    let href = element.value().attr("href").map(str::trim).unwrap_or("");

    // Anchors, script links and missing hrefs only contribute their text
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        render_children(element, out, preformatted);
        return;
    }

    // Render the link label on its own, then flatten it to a single line
    let mut label = TextBuffer::default();
    render_children(element, &mut label, preformatted);
    let label = label.finish().split_whitespace().collect::<Vec<_>>().join(" ");

    // A bare absolute URL shown as its own label becomes <href>
    if label == href && (href.starts_with("http://") || href.starts_with("https://")) {
        out.push_word(&format!("<{}>", href));
    } else {
        out.push_word(&format!("[{}]({})", label, href));
    }
}

// <img alt="..." src="...">  ->  ![alt](src)
fn render_image(element: ElementRef, out: &mut TextBuffer) {
    let alt = element.value().attr("alt").unwrap_or("").trim();

    match element.value().attr("src").map(str::trim) {
        Some(src) if !src.is_empty() => out.push_word(&format!("![{}]({})", alt, src)),
        _ if !alt.is_empty() => out.push_word(alt),
        _ => {}
    }
}

// Accumulates output text while collapsing whitespace the way a browser would
#[derive(Default)]
struct TextBuffer {
    text: String,
    // A space is owed before the next word
    pending_space: bool,
}

impl TextBuffer {
    fn at_line_start(&self) -> bool {
        self.text.is_empty() || self.text.ends_with('\n')
    }

    // Inline text: runs of whitespace collapse to one space
    fn push_text(&mut self, text: &str) {
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }

        for word in text.split_whitespace() {
            self.push_word(word);
            self.pending_space = true;
        }

        if !text.ends_with(char::is_whitespace) {
            self.pending_space = false;
        }
    }

    fn push_word(&mut self, word: &str) {
        if self.pending_space && !self.at_line_start() {
            self.text.push(' ');
        }
        self.text.push_str(word);
        self.pending_space = false;
    }

    // Text that is written exactly as given (markers, <pre> content)
    fn push_raw(&mut self, text: &str) {
        self.text.push_str(text);
        self.pending_space = false;
    }

    fn line_break(&mut self) {
        self.text.push('\n');
        self.pending_space = false;
    }

    fn start_line(&mut self) {
        if !self.at_line_start() {
            self.text.push('\n');
        }
        self.pending_space = false;
    }

    fn block_break(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with("\n\n") {
            self.start_line();
            self.text.push('\n');
        }
        self.pending_space = false;
    }

    // Strips trailing spaces per line and squeezes runs of blank lines
    fn finish(self) -> String {
        let mut result = String::with_capacity(self.text.len());
        let mut blank_run = 0;

        for line in self.text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            result.push_str(line);
            result.push('\n');
        }

        result.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_keeps_href_verbatim() {
        let html = r#"<p>See <a href="https://a.test/faq">the FAQ</a> now</p>"#;
        assert_eq!(html_to_text(html), "See [the FAQ](https://a.test/faq) now");
    }

    #[test]
    fn test_relative_href_is_not_resolved() {
        let html = r#"<a href="/docs">Docs</a>"#;
        assert_eq!(html_to_text(html), "[Docs](/docs)");
    }

    #[test]
    fn test_self_titled_link_is_angle_bracketed() {
        let html = r#"<p>Mail <a href="https://a.test/x">https://a.test/x</a></p>"#;
        let text = html_to_text(html);
        assert_eq!(text, "Mail <https://a.test/x>");
        // Not in (url) form, so it yields no followable link
        assert!(crate::text::find_links(&text, None).is_empty());

        // Relative hrefs keep the bracket form even when self-titled
        assert_eq!(html_to_text(r#"<a href="/docs">/docs</a>"#), "[/docs](/docs)");
    }

    #[test]
    fn test_head_and_scripts_are_dropped() {
        let html = r#"
            <html>
              <head><title>Ignored</title><style>p { color: red; }</style></head>
              <body><script>var x = 1;</script><p>Visible</p></body>
            </html>
        "#;
        assert_eq!(html_to_text(html), "Visible");
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let html = "<h2>Returns</h2><p>Within   30\n days.</p><p>Free.</p>";
        assert_eq!(html_to_text(html), "## Returns\n\nWithin 30 days.\n\nFree.");
    }

    #[test]
    fn test_list_items() {
        let html = "<ul><li>One</li><li>Two <b>bold</b></li></ul>";
        assert_eq!(html_to_text(html), "* One\n* Two bold");
    }

    #[test]
    fn test_image_and_anchor_only_links() {
        let html = r##"<p><img src="https://a.test/logo.png" alt="Logo"> <a href="#top">Top</a></p>"##;
        assert_eq!(html_to_text(html), "![Logo](https://a.test/logo.png) Top");
    }

    #[test]
    fn test_preformatted_keeps_whitespace() {
        let html = "<pre>a  b\n  c</pre>";
        assert_eq!(html_to_text(html), "a  b\n  c");
    }
}
