//! Minimal typed markup tree
//!
//! Text and attribute values are escaped on output; only [`Node::Raw`] is
//! written verbatim, and it is reserved for the fixed stylesheet.

use html_escape::{encode_double_quoted_attribute, encode_text};

const INDENT: &str = "    ";

/// A node in the markup tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    /// Append a child only when `element` is `Some`
    #[must_use]
    pub fn child_opt(self, element: Option<Element>) -> Self {
        match element {
            Some(element) => self.child(element),
            None => self,
        }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    #[must_use]
    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.children.push(Node::Raw(raw.into()));
        self
    }

    /// Serialize with four-space indentation
    ///
    /// Elements holding only text stay on one line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, 0);
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        out.push_str(&format!("{pad}<{}", self.name));
        for (name, value) in &self.attrs {
            out.push_str(&format!(
                " {name}=\"{}\"",
                encode_double_quoted_attribute(value)
            ));
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');

        let inline = self
            .children
            .iter()
            .all(|child| matches!(child, Node::Text(_)));
        if inline {
            for child in &self.children {
                if let Node::Text(text) = child {
                    out.push_str(&encode_text(text));
                }
            }
        } else {
            for child in &self.children {
                out.push('\n');
                match child {
                    Node::Element(element) => element.write_to(out, depth + 1),
                    Node::Text(text) => {
                        out.push_str(&format!("{pad}{INDENT}{}", encode_text(text)));
                    }
                    Node::Raw(raw) => out.push_str(raw),
                }
            }
            out.push('\n');
            out.push_str(&pad);
        }
        out.push_str(&format!("</{}>", self.name));
    }
}
