use std::collections::HashMap;

use crate::dom::{Dom, NodeId};
use crate::{Error, Result};

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_raw_text_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("script") || tag.eq_ignore_ascii_case("style")
}

pub(crate) fn decode_entities(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let chars = src.chars().collect::<Vec<_>>();
    let mut i = 0usize;
    while i < chars.len() {
        if chars[i] == '&' {
            if let Some(end) = chars[i..].iter().position(|&ch| ch == ';') {
                let entity = chars[i + 1..i + end].iter().collect::<String>();
                let decoded = match entity.as_str() {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => entity
                        .strip_prefix('#')
                        .and_then(|digits| {
                            if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
                                u32::from_str_radix(hex, 16).ok()
                            } else {
                                digits.parse::<u32>().ok()
                            }
                        })
                        .and_then(char::from_u32),
                };
                if let Some(ch) = decoded {
                    out.push(ch);
                    i += end + 1;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn starts_with(&self, needle: &str) -> bool {
        let needle = needle.chars().collect::<Vec<_>>();
        self.chars[self.pos..].starts_with(&needle)
    }

    fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.chars.len());
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map(char::is_whitespace).unwrap_or(false) {
            self.advance(1);
        }
    }

    fn take_until(&mut self, stop: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if stop(ch) {
                break;
            }
            out.push(ch);
            self.advance(1);
        }
        out
    }

    fn done(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

/// Parses fixture markup into a `Dom`. Handles elements, attributes
/// (double-quoted, single-quoted, unquoted, bare), text, comments, doctype,
/// and void tags. Script and style payloads are swallowed as raw text.
pub(crate) fn parse_html(src: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut cursor = Cursor::new(src);
    let mut open_stack: Vec<(NodeId, String)> = Vec::new();

    while !cursor.done() {
        let parent = open_stack
            .last()
            .map(|(id, _)| *id)
            .unwrap_or(dom.root);

        if cursor.starts_with("<!--") {
            cursor.advance(4);
            while !cursor.done() && !cursor.starts_with("-->") {
                cursor.advance(1);
            }
            cursor.advance(3);
            continue;
        }

        if cursor.starts_with("<!") {
            while !cursor.done() && cursor.peek() != Some('>') {
                cursor.advance(1);
            }
            cursor.advance(1);
            continue;
        }

        if cursor.starts_with("</") {
            cursor.advance(2);
            let name = cursor.take_until(|ch| ch == '>' || ch.is_whitespace());
            cursor.skip_whitespace();
            if cursor.peek() != Some('>') {
                return Err(Error::HtmlParse(format!("malformed closing tag </{name}")));
            }
            cursor.advance(1);
            let Some(position) = open_stack
                .iter()
                .rposition(|(_, open)| open.eq_ignore_ascii_case(&name))
            else {
                return Err(Error::HtmlParse(format!("unmatched closing tag </{name}>")));
            };
            open_stack.truncate(position);
            continue;
        }

        if cursor.peek() == Some('<') {
            cursor.advance(1);
            let name = cursor.take_until(|ch| ch == '>' || ch == '/' || ch.is_whitespace());
            if name.is_empty() {
                return Err(Error::HtmlParse("empty tag name".to_string()));
            }
            let attrs = parse_attrs(&mut cursor, &name)?;
            let self_closing = cursor.peek() == Some('/');
            if self_closing {
                cursor.advance(1);
            }
            if cursor.peek() != Some('>') {
                return Err(Error::HtmlParse(format!("unterminated tag <{name}")));
            }
            cursor.advance(1);

            let tag = name.to_ascii_lowercase();
            let element = dom.create_element(parent, tag.clone(), attrs);
            if is_raw_text_tag(&tag) {
                let close = format!("</{tag}");
                let mut raw = String::new();
                while !cursor.done() && !cursor.starts_with(&close) {
                    raw.push(cursor.peek().unwrap_or('\0'));
                    cursor.advance(1);
                }
                if !raw.is_empty() {
                    dom.create_text(element, raw);
                }
                cursor.advance(close.chars().count());
                cursor.take_until(|ch| ch == '>');
                cursor.advance(1);
            } else if !self_closing && !is_void_tag(&tag) {
                open_stack.push((element, tag));
            }
            continue;
        }

        let text = cursor.take_until(|ch| ch == '<');
        if !text.trim().is_empty() {
            dom.create_text(parent, decode_entities(&text));
        }
    }

    if let Some((_, tag)) = open_stack.first() {
        return Err(Error::HtmlParse(format!("unclosed tag <{tag}>")));
    }

    Ok(dom)
}

fn parse_attrs(cursor: &mut Cursor, tag: &str) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some('>') | Some('/') => return Ok(attrs),
            None => return Err(Error::HtmlParse(format!("unterminated tag <{tag}"))),
            _ => {}
        }
        let name = cursor
            .take_until(|ch| ch == '=' || ch == '>' || ch == '/' || ch.is_whitespace())
            .to_ascii_lowercase();
        if name.is_empty() {
            return Err(Error::HtmlParse(format!("malformed attribute in <{tag}")));
        }
        cursor.skip_whitespace();
        if cursor.peek() != Some('=') {
            attrs.insert(name, String::new());
            continue;
        }
        cursor.advance(1);
        cursor.skip_whitespace();
        let value = match cursor.peek() {
            Some(quote @ ('"' | '\'')) => {
                cursor.advance(1);
                let raw = cursor.take_until(|ch| ch == quote);
                if cursor.peek() != Some(quote) {
                    return Err(Error::HtmlParse(format!(
                        "unterminated attribute value in <{tag}"
                    )));
                }
                cursor.advance(1);
                raw
            }
            _ => cursor.take_until(|ch| ch == '>' || ch.is_whitespace()),
        };
        attrs.insert(name, decode_entities(&value));
    }
}
