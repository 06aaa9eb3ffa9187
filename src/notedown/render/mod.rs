//! # Rendering
//!
//! Markdown source becomes a display-ready HTML document in two pure steps:
//!
//! 1. [`render`]: Markdown → HTML fragment (this module)
//! 2. [`document::DocumentWrapper::wrap`]: fragment → full document with the
//!    active [`theme::Stylesheet`] embedded
//!
//! Note content is untrusted. The renderer never lets it execute script in
//! the preview surface:
//! - raw HTML blocks and inline tags are emitted as escaped text
//! - link and image targets with a script-capable scheme are replaced by `#`
//!
//! Rendering has no error conditions. Malformed Markdown (an unterminated
//! fence, a ragged table) degrades to whatever CommonMark makes of it.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

pub mod document;
pub mod theme;

pub use document::{wrap, DocumentWrapper};

/// Replacement destination for links the renderer refuses to emit.
const NEUTRAL_URL: &str = "#";

fn parser_options() -> Options {
    // Fenced code blocks are core CommonMark; tables are the one extension.
    Options::ENABLE_TABLES
}

/// Render Markdown source to a sanitized HTML fragment.
pub fn render(source: &str) -> String {
    let parser = Parser::new_ext(source, parser_options()).map(sanitize_event);

    let mut output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        // push_html escapes Text, so the markup shows up literally
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: neutralize_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: neutralize_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn neutralize_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        CowStr::Borrowed(NEUTRAL_URL)
    }
}

/// Relative links, fragments, and `http(s)`/`mailto`-style schemes pass.
/// `javascript:`, `vbscript:`, `file:` and non-image `data:` do not.
///
/// Browsers ignore ASCII whitespace and control characters inside the scheme,
/// so those are stripped before comparing.
pub fn is_safe_url(url: &str) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let Some(colon) = normalized.find(':') else {
        return true;
    };

    // A ':' after the first '/', '?' or '#' is part of a relative path, not a scheme
    if let Some(delim) = normalized.find(['/', '?', '#']) {
        if delim < colon {
            return true;
        }
    }

    let scheme = &normalized[..colon];
    match scheme {
        "javascript" | "vbscript" | "file" => false,
        "data" => normalized.starts_with("data:image/") && !normalized.starts_with("data:image/svg"),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(render(""), "");
        assert_eq!(render("   \n\n\t\n"), "");
    }

    #[test]
    fn test_headings_and_emphasis() {
        let html = render("# todo\n\nSome *emphasis* and **strong** text.");
        assert!(html.contains("<h1>todo</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<strong>strong</strong>"));
    }

    #[test]
    fn test_lists_blockquotes_links_inline_code() {
        let html = render("- one\n- two\n\n> quoted\n\n[site](https://example.com) `code`");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<blockquote>"));
        assert!(html.contains(r#"<a href="https://example.com">site</a>"#));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_fenced_code_block() {
        let html = render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<pre><code class="language-rust">fn main() {}"#));
        assert!(html.contains("</code></pre>"));
    }

    #[test]
    fn test_unterminated_fence_does_not_fail() {
        let html = render("```\nlet x = 1;\nstill code");
        assert!(html.starts_with("<pre><code>"));
        assert!(html.contains("still code"));
    }

    #[test]
    fn test_pipe_table() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<thead>"));
        assert_eq!(html.matches("<th>").count(), 2);
        assert_eq!(html.matches("<tr>").count(), 2);
        assert_eq!(html.matches("<td>").count(), 2);
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render("<script>alert(1)</script>\n\nhi <img src=x onerror=alert(1)>");
        assert!(!html.contains("<script"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn test_script_links_are_neutralized() {
        let html = render("[click](javascript:alert(1)) and ![x](vbscript:msgbox)");
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("vbscript:"));
        assert!(html.contains(r##"<a href="#">click</a>"##));
    }

    #[test]
    fn test_is_safe_url() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("mailto:me@example.com"));
        assert!(is_safe_url("other-note.md"));
        assert!(is_safe_url("#section"));
        assert!(is_safe_url("./a:b"));
        assert!(is_safe_url("data:image/png;base64,AAAA"));

        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("JavaScript:alert(1)"));
        assert!(!is_safe_url(" java\tscript:alert(1)"));
        assert!(!is_safe_url("data:text/html,<script>"));
        assert!(!is_safe_url("data:image/svg+xml,<svg onload=x>"));
        assert!(!is_safe_url("file:///etc/passwd"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let src = "# a\n\n| x |\n|---|\n| y |";
        assert_eq!(render(src), render(src));
    }
}
