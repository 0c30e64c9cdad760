//! Element-construction primitive shared by every renderer in the crate.
//!
//! An [`Element`] is an unattached node: a tag name, an attribute mapping, and
//! child content (elements, text, or pre-rendered markup). Rendering is a pure
//! serialization step, so widget state never leaks into the tree it produces.

use std::collections::BTreeMap;

/// Tags serialized without a closing tag.
const VOID_TAGS: [&str; 4] = ["br", "hr", "img", "input"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

/// One constructed, unattached markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builds an element from a tag name and an attribute mapping.
    pub fn with(tag: &str, attrs: &[(&str, &str)]) -> Self {
        let mut element = Self::new(tag);
        for (name, value) in attrs {
            element.attrs.insert((*name).to_string(), (*value).to_string());
        }
        element
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Sets a boolean attribute, serialized as a bare name.
    pub fn flag(mut self, name: &str) -> Self {
        self.attrs.insert(name.to_string(), String::new());
        self
    }

    /// Appends to the `class` attribute.
    pub fn class(mut self, value: &str) -> Self {
        match self.attrs.get_mut("class") {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(value);
            }
            _ => {
                self.attrs.insert("class".into(), value.to_string());
            }
        }
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn text(mut self, value: &str) -> Self {
        self.children.push(Node::Text(value.to_string()));
        self
    }

    /// Appends pre-rendered markup verbatim.
    pub fn raw(mut self, html: &str) -> Self {
        self.children.push(Node::Raw(html.to_string()));
        self
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn prepend(&mut self, child: Element) {
        self.children.insert(0, Node::Element(child));
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_html(out),
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Raw(html) => out.push_str(html),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Converts arbitrary text into a class-name-safe slug: lowercase, with runs
/// of non-alphanumeric characters collapsed into single dashes.
pub fn to_class_name(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut last_dash = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !slug.is_empty() && !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
