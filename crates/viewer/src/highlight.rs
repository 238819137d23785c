//! Syntax highlighting of fetched pattern sources.
//!
//! The output follows Prism's token markup (`<span class="token tag">` and
//! friends) so the style guide's Prism themes apply unchanged.

use std::fmt::Debug;

pub trait Highlighter: Send + Sync + Debug {
    /// Returns HTML for `source`. Implementations must escape everything they
    /// do not wrap in token spans.
    fn highlight(&self, source: &str, language: &str) -> String;
}

/// Highlights HTML and HTML-like template languages.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupHighlighter;

impl Highlighter for MarkupHighlighter {
    fn highlight(&self, source: &str, _language: &str) -> String {
        let mut out = String::with_capacity(source.len() * 2);
        let bytes = source.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            let rest = &source[i..];
            let consumed = if rest.starts_with("<!--") {
                token(&mut out, "comment", until_after(rest, "-->"))
            } else if rest.starts_with("<![CDATA[") {
                token(&mut out, "cdata", until_after(rest, "]]>"))
            } else if starts_with_ignore_case(rest, "<!doctype") {
                token(&mut out, "doctype", until_after(rest, ">"))
            } else if rest.starts_with("<?") {
                token(&mut out, "prolog", until_after(rest, "?>"))
            } else if is_tag_start(rest) {
                let tag = &rest[..tag_len(rest)];
                push_tag(&mut out, tag);
                tag.len()
            } else if let Some(len) = entity_len(rest) {
                token(&mut out, "entity", &rest[..len])
            } else {
                let len = rest
                    .char_indices()
                    .skip(1)
                    .find(|&(_, c)| c == '<' || c == '&')
                    .map(|(n, _)| n)
                    .unwrap_or(rest.len());
                encode_into(&mut out, &rest[..len]);
                len
            };
            i += consumed;
        }
        out
    }
}

/// Prism's encoding: `&` and `<` are escaped, non-breaking spaces flattened.
fn encode_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '\u{a0}' => out.push(' '),
            other => out.push(other),
        }
    }
}

fn token(out: &mut String, kind: &str, text: &str) -> usize {
    out.push_str("<span class=\"token ");
    out.push_str(kind);
    out.push_str("\">");
    encode_into(out, text);
    out.push_str("</span>");
    text.len()
}

fn until_after<'a>(text: &'a str, terminator: &str) -> &'a str {
    match text.find(terminator) {
        Some(pos) => &text[..pos + terminator.len()],
        None => text,
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn is_tag_start(text: &str) -> bool {
    let bytes = text.as_bytes();
    match (bytes.first(), bytes.get(1), bytes.get(2)) {
        (Some(b'<'), Some(b'/'), Some(c)) => c.is_ascii_alphabetic(),
        (Some(b'<'), Some(c), _) => c.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Length of the tag starting at `text[0] == '<'`, honouring quoted values.
fn tag_len(text: &str) -> usize {
    let mut quote: Option<u8> = None;
    for (i, &b) in text.as_bytes().iter().enumerate().skip(1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return i + 1,
            None => {}
        }
    }
    text.len()
}

/// `&name;`, `&#123;` or `&#x1F;`.
fn entity_len(text: &str) -> Option<usize> {
    let body = text.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];
    let valid = match name.strip_prefix('#') {
        Some(num) => match num.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        },
        None => !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()),
    };
    valid.then_some(end + 2)
}

fn push_tag(out: &mut String, tag: &str) {
    let closed = tag.ends_with('>');
    let inner = tag.strip_suffix('>').unwrap_or(tag);
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(stripped) if closed => (stripped, true),
        _ => (inner, false),
    };
    let open = if inner.starts_with("</") { "</" } else { "<" };
    let after_open = &inner[open.len()..];
    let name_len = after_open
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(after_open.len());
    let (name, attrs) = after_open.split_at(name_len);

    out.push_str("<span class=\"token tag\"><span class=\"token tag\"><span class=\"token punctuation\">");
    encode_into(out, open);
    out.push_str("</span>");
    encode_into(out, name);
    out.push_str("</span>");
    push_attributes(out, attrs);
    if closed {
        out.push_str("<span class=\"token punctuation\">");
        out.push_str(if self_closing { "/>" } else { ">" });
        out.push_str("</span>");
    }
    out.push_str("</span>");
}

fn push_attributes(out: &mut String, attrs: &str) {
    let bytes = attrs.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() || bytes[i] == b'/' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
                i += 1;
            }
            encode_into(out, &attrs[start..i]);
            continue;
        }

        let start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        token(out, "attr-name", &attrs[start..i]);

        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            out.push_str("<span class=\"token attr-value\"><span class=\"token punctuation attr-equals\">=</span>");
            match bytes.get(i) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let quote = &attrs[i..i + 1];
                    let value_start = i + 1;
                    let value_end = attrs[value_start..]
                        .find(q as char)
                        .map(|n| value_start + n)
                        .unwrap_or(attrs.len());
                    out.push_str("<span class=\"token punctuation\">");
                    out.push_str(quote);
                    out.push_str("</span>");
                    encode_into(out, &attrs[value_start..value_end]);
                    if value_end < attrs.len() {
                        out.push_str("<span class=\"token punctuation\">");
                        out.push_str(quote);
                        out.push_str("</span>");
                        i = value_end + 1;
                    } else {
                        i = value_end;
                    }
                }
                _ => {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    encode_into(out, &attrs[value_start..i]);
                }
            }
            out.push_str("</span>");
        }
    }
}
