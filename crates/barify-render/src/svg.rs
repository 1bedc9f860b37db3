//! SVG output: a pure document tree built from a layout, plus serializers.

mod element;
mod util;

pub use element::{CompactSerializer, IndentedSerializer, SvgElement, SvgNode, SvgSerializer};

use crate::model::BarDiagramLayout;
use util::mm;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Clone, PartialEq)]
pub struct SvgRenderOptions {
    /// CSS font family for side labels. Passed through as-is.
    pub font_family: String,
    /// CSS font size for side labels (e.g. `10pt`). Passed through as-is.
    pub font_size: String,
    /// Pretty-print the markup instead of emitting a single line.
    pub indent: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: "10pt".to_string(),
            indent: false,
        }
    }
}

fn label_css(options: &SvgRenderOptions) -> String {
    format!(
        "text {{ font-family: {}; font-size: {}; }}",
        options.font_family.trim(),
        options.font_size.trim()
    )
}

/// Builds the document tree: root `<svg>` sized in millimeters, a `<style>` block when there
/// are labels, then all bars, then all labels.
pub fn build_document(layout: &BarDiagramLayout, options: &SvgRenderOptions) -> SvgElement {
    let mut root = SvgElement::new("svg")
        .attr("xmlns", SVG_NAMESPACE)
        .attr("width", mm(layout.width))
        .attr("height", mm(layout.height));

    if !layout.labels.is_empty() {
        root.push(SvgElement::new("style").text(label_css(options)));
    }

    for rect in &layout.rects {
        root.push(
            SvgElement::new("rect")
                .attr("x", mm(rect.x))
                .attr("y", mm(rect.y))
                .attr("width", mm(rect.width))
                .attr("height", mm(rect.height))
                .attr("style", format!("fill:{};", rect.color)),
        );
    }

    for label in &layout.labels {
        root.push(
            SvgElement::new("text")
                .attr("x", mm(label.x))
                .attr("y", mm(label.y))
                .text(label.text.as_str()),
        );
    }

    root
}

pub fn render_svg(layout: &BarDiagramLayout, options: &SvgRenderOptions) -> String {
    let doc = build_document(layout, options);
    if options.indent {
        IndentedSerializer::default().serialize(&doc)
    } else {
        CompactSerializer.serialize(&doc)
    }
}
