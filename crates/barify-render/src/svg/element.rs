use super::util::escape_xml;
use std::fmt::Write as _;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

#[derive(Debug, Clone, PartialEq)]
pub enum SvgNode {
    Element(SvgElement),
    Text(String),
}

/// A plain value tree for an SVG document. Attribute values and text are stored unescaped.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<SvgNode>,
}

impl SvgElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(SvgNode::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: SvgElement) {
        self.children.push(SvgNode::Element(child));
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.children.iter().filter_map(|c| match c {
            SvgNode::Element(e) => Some(e),
            SvgNode::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                SvgNode::Text(t) => Some(t.as_str()),
                SvgNode::Element(_) => None,
            })
            .collect()
    }
}

/// Turns a document tree into markup.
pub trait SvgSerializer {
    fn serialize(&self, root: &SvgElement) -> String;
}

/// Single-line output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactSerializer;

/// One element per line, children indented.
#[derive(Debug, Clone, Copy)]
pub struct IndentedSerializer {
    pub indent: usize,
}

impl Default for IndentedSerializer {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

fn write_start_tag(out: &mut String, el: &SvgElement) {
    out.push('<');
    out.push_str(&el.name);
    for (k, v) in &el.attrs {
        let _ = write!(out, r#" {k}="{}""#, escape_xml(v));
    }
}

fn write_compact(out: &mut String, el: &SvgElement) {
    write_start_tag(out, el);
    if el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &el.children {
        match child {
            SvgNode::Element(e) => write_compact(out, e),
            SvgNode::Text(t) => out.push_str(&escape_xml(t)),
        }
    }
    let _ = write!(out, "</{}>", el.name);
}

impl SvgSerializer for CompactSerializer {
    fn serialize(&self, root: &SvgElement) -> String {
        let mut out = String::from(XML_DECLARATION);
        out.push('\n');
        write_compact(&mut out, root);
        out.push('\n');
        out
    }
}

impl IndentedSerializer {
    fn write(&self, out: &mut String, el: &SvgElement, depth: usize) {
        let pad = " ".repeat(self.indent * depth);
        out.push_str(&pad);
        write_start_tag(out, el);
        if el.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        // Elements holding only text stay on one line so whitespace does not leak into labels.
        if el.elements().next().is_none() {
            out.push('>');
            out.push_str(&escape_xml(&el.text_content()));
            let _ = writeln!(out, "</{}>", el.name);
            return;
        }
        out.push_str(">\n");
        for child in &el.children {
            match child {
                SvgNode::Element(e) => self.write(out, e, depth + 1),
                SvgNode::Text(t) => {
                    let _ = writeln!(
                        out,
                        "{}{}",
                        " ".repeat(self.indent * (depth + 1)),
                        escape_xml(t)
                    );
                }
            }
        }
        let _ = writeln!(out, "{pad}</{}>", el.name);
    }
}

impl SvgSerializer for IndentedSerializer {
    fn serialize(&self, root: &SvgElement) -> String {
        let mut out = String::from(XML_DECLARATION);
        out.push('\n');
        self.write(&mut out, root, 0);
        out
    }
}
