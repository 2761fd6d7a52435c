//! Reduction of fetched documents to displayable text.
//!
//! The viewer shows pages as plain text, so HTML bodies get a small
//! extraction pass: `script`/`style`/`head` subtrees are dropped, remaining
//! tags are stripped (block-level tags become line breaks), common entities
//! are decoded, and runs of whitespace collapse. Anything that is not HTML
//! is shown verbatim.

/// Tags whose entire content is discarded.
const SKIPPED_TAGS: &[&str] = &["script", "style", "head", "svg", "noscript", "template"];

/// Tags that terminate a line of text when stripped.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "tr", "table", "section", "article", "header", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "hr", "nav", "form",
];

pub fn is_html(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    essence == "text/html" || essence == "application/xhtml+xml"
}

/// Strip an HTML document down to readable text.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 4);
    let mut chars = html.char_indices().peekable();
    let mut skip_until: Option<String> = None;

    while let Some((idx, ch)) = chars.next() {
        if ch != '<' {
            if skip_until.is_none() {
                out.push(ch);
            }
            continue;
        }

        // Find the end of the tag; an unterminated tag swallows the rest.
        let rest = &html[idx + 1..];
        let Some(end) = rest.find('>') else { break };
        let tag_body = &rest[..end];
        for _ in 0..tag_body.chars().count() + 1 {
            chars.next();
        }

        let (closing, name_part) = match tag_body.strip_prefix('/') {
            Some(stripped) => (true, stripped),
            None => (false, tag_body),
        };
        let name: String = name_part
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if let Some(awaited) = &skip_until {
            if closing && name == *awaited {
                skip_until = None;
            }
            continue;
        }

        if tag_body.starts_with("!--") {
            // Comment: resynchronize on "-->".
            if let Some(close) = html[idx..].find("-->") {
                let target = idx + close + 3;
                while chars.peek().is_some_and(|&(i, _)| i < target) {
                    chars.next();
                }
            } else {
                break;
            }
            continue;
        }

        if !closing && SKIPPED_TAGS.contains(&name.as_str()) && !tag_body.ends_with('/') {
            skip_until = Some(name);
        } else if BLOCK_TAGS.contains(&name.as_str()) {
            out.push('\n');
        } else {
            // Inline tag boundaries must not glue words together.
            out.push(' ');
        }
    }

    collapse_whitespace(&decode_entities(&out))
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        // Entity names are short; give up past 10 chars.
        let semi = rest
            .char_indices()
            .take(10)
            .find(|&(_, c)| c == ';')
            .map(|(i, _)| i);
        let Some(semi) = semi else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ => entity
                .strip_prefix('#')
                .and_then(|num| {
                    if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        num.parse().ok()
                    }
                })
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse horizontal whitespace runs and drop blank lines.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let mut compact = String::with_capacity(line.len());
        let mut last_space = true;
        for ch in line.chars() {
            if ch.is_whitespace() {
                if !last_space {
                    compact.push(' ');
                    last_space = true;
                }
            } else {
                compact.push(ch);
                last_space = false;
            }
        }
        let compact = compact.trim_end();
        if compact.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(compact);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_html_content_types() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("application/xhtml+xml"));
        assert!(!is_html("text/plain"));
        assert!(!is_html("application/json"));
    }

    #[test]
    fn strips_tags_and_keeps_text() {
        let text = html_to_text("<html><body><p>Hello <b>world</b></p></body></html>");
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn drops_script_and_style_content() {
        let text = html_to_text(
            "<head><style>.x{color:red}</style></head>\
             <body><script>alert(1)</script><p>visible</p></body>",
        );
        assert_eq!(text, "visible");
    }

    #[test]
    fn block_tags_break_lines() {
        let text = html_to_text("<h1>Title</h1><p>First</p><p>Second</p>");
        assert_eq!(text, "Title\nFirst\nSecond");
    }

    #[test]
    fn inline_tags_do_not_glue_words() {
        let text = html_to_text("one<span>two</span>three");
        assert_eq!(text, "one two three");
    }

    #[test]
    fn decodes_common_and_numeric_entities() {
        assert_eq!(html_to_text("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(html_to_text("&#65;&#x42;"), "AB");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(html_to_text("&bogus; &amp;"), "&bogus; &");
    }

    #[test]
    fn comments_are_removed() {
        assert_eq!(html_to_text("a<!-- hidden <p>not text</p> -->b"), "ab");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let text = html_to_text("<p>  spaced\t\tout  </p><p></p><p>next</p>");
        assert_eq!(text, "spaced out\nnext");
    }

    #[test]
    fn unterminated_tag_truncates_safely() {
        assert_eq!(html_to_text("ok<div class=\"open"), "ok");
    }

    #[test]
    fn handles_multibyte_text_around_tags() {
        let text = html_to_text("<p>héllo — wörld</p>");
        assert_eq!(text, "héllo — wörld");
    }
}
