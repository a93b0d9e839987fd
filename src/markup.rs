//! A minimal markup tree for inlining vector logos.
//!
//! The whole document is checked for well-formedness with `roxmltree`, but
//! only the root element is modeled: its name, its attributes and its inner
//! content kept verbatim. That is enough to move a logo into place by setting
//! attributes on the root and writing it back out.

use roxmltree::{Document, ParsingOptions};

use crate::error::{RenderError, RenderResult};

/// The root element of a parsed markup document.
///
/// # Example
///
/// ```rust
/// use qirust_svg::markup::MarkupRoot;
///
/// let mut root = MarkupRoot::parse(r#"<?xml version="1.0"?><svg viewBox="0 0 4 4"><rect width="4" height="4"/></svg>"#).unwrap();
/// root.set_attribute("width", "12");
///
/// assert_eq!(
///     root.serialize(),
///     r#"<svg viewBox="0 0 4 4" width="12"><rect width="4" height="4"/></svg>"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRoot {
    name: String,
    /// Values are kept escaped, exactly as they are written back.
    attributes: Vec<(String, String)>,
    /// `None` for a self-closed root.
    content: Option<String>,
}

impl MarkupRoot {
    /// Parses `source` and keeps its root element.
    ///
    /// The prolog (declaration, comments, processing instructions, doctype)
    /// is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Parse`] if `source` is not a well-formed XML
    /// document: no root element, unbalanced tags, unescaped `&` or `<`,
    /// undefined entities, undeclared namespace prefixes, or anything but
    /// comments and whitespace after the root.
    pub fn parse(source: &str) -> RenderResult<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(source, options)
            .map_err(|err| RenderError::parse(err.to_string()))?;
        let element = &source[document.root_element().range()];

        let tag_end = start_tag_end(element)
            .ok_or_else(|| RenderError::parse("unterminated root start tag"))?;
        let self_closing = element[..tag_end].ends_with("/>");
        let inner = if self_closing { 2 } else { 1 };
        let (name, attributes) = split_start_tag(&element[1..tag_end - inner])?;

        let content = if self_closing {
            None
        } else {
            let close = element
                .rfind("</")
                .ok_or_else(|| RenderError::parse("missing root end tag"))?;
            Some(element[tag_end..close].to_string())
        };

        Ok(Self {
            name,
            attributes,
            content,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw (escaped) value of an attribute.
    #[cfg(test)]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing an existing one in place.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let value = escape_attribute(value);
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Writes the element back out without any added formatting.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(
            self.name.len() * 2 + self.content.as_ref().map_or(0, String::len) + 64,
        );
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        match &self.content {
            None => out.push_str(" />"),
            Some(content) => {
                out.push('>');
                out.push_str(content);
                out.push_str("</");
                out.push_str(&self.name);
                out.push('>');
            }
        }
        out
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Byte offset just past the `>` closing the first tag of `element`.
fn start_tag_end(element: &str) -> Option<usize> {
    let mut quote = None;
    for (index, c) in element.char_indices() {
        match (quote, c) {
            (Some(open), _) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(index + 1),
            _ => {}
        }
    }
    None
}

/// Splits the inside of an already validated start tag into its name and
/// attributes, keeping the values escaped as written.
fn split_start_tag(tag: &str) -> RenderResult<(String, Vec<(String, String)>)> {
    let name_end = tag.find(char::is_whitespace).unwrap_or(tag.len());
    let name = tag[..name_end].to_string();

    let mut attributes = Vec::new();
    let mut rest = tag[name_end..].trim_start();
    while !rest.is_empty() {
        let (key, after_key) = rest
            .split_once('=')
            .ok_or_else(|| RenderError::parse(format!("malformed attribute in <{}>", name)))?;
        let after_key = after_key.trim_start();
        let quote = after_key
            .chars()
            .next()
            .ok_or_else(|| RenderError::parse(format!("malformed attribute in <{}>", name)))?;
        let value_end = after_key[1..]
            .find(quote)
            .ok_or_else(|| RenderError::parse(format!("malformed attribute in <{}>", name)))?;
        let value = &after_key[1..1 + value_end];
        // Values are always written back double quoted.
        attributes.push((key.trim().to_string(), value.replace('"', "&quot;")));
        rest = after_key[value_end + 2..].trim_start();
    }
    Ok((name, attributes))
}
