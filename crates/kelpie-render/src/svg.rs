//! Scene → SVG markup.
//!
//! Paint order is part of the contract: phases behind lanes, lanes behind
//! edges, edges behind nodes. Every node group carries `data-node-id` so the
//! host can route clicks back to diagram nodes.

use crate::model::{EdgePath, NodeShape, Scene, SceneNode};
use kelpie_core::geom::Bounds;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the computed viewBox.
    pub viewbox_padding: f64,
    /// Optional diagram id used to namespace marker ids when several
    /// diagrams share one document.
    pub diagram_id: Option<String>,
    /// When false, the embedded `<style>` block is omitted (hosts that ship
    /// their own stylesheet).
    pub include_styles: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 8.0,
            diagram_id: None,
            include_styles: true,
        }
    }
}

const BASE_STYLES: &str = r#"<style>
.lane-band { fill: none; stroke: #9aa4b1; stroke-width: 1; }
.lane-header { fill: #eef1f5; stroke: #9aa4b1; stroke-width: 1; }
.lane-label { fill: #1f2937; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 13px; text-anchor: middle; dominant-baseline: middle; }
.phase-divider { stroke: #c3cad4; stroke-width: 1; stroke-dasharray: 6 4; }
.phase-label { fill: #6b7280; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 12px; }
.edge { fill: none; stroke: #111827; }
.node-label { fill: #ffffff; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 13px; text-anchor: middle; dominant-baseline: middle; }
</style>
"#;

pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> String {
    let bounds = scene.bounds.unwrap_or(Bounds::new(0.0, 0.0, 100.0, 100.0));
    let pad = options.viewbox_padding.max(0.0);

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        fmt(bounds.x - pad),
        fmt(bounds.y - pad),
        fmt((bounds.width + pad * 2.0).max(1.0)),
        fmt((bounds.height + pad * 2.0).max(1.0))
    );
    if options.include_styles {
        out.push_str(BASE_STYLES);
    }

    let marker_id = arrowhead_marker_id(options);
    if scene.edges.iter().any(|e| e.arrowhead) {
        let _ = writeln!(
            &mut out,
            r##"<defs><marker id="{marker_id}" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="7" markerHeight="7" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="#111827"/></marker></defs>"##
        );
    }

    if !scene.phases.is_empty() {
        out.push_str(r#"<g class="phases">"#);
        for phase in &scene.phases {
            let _ = write!(
                &mut out,
                r#"<line class="phase-divider" x1="{x}" y1="{y1}" x2="{x}" y2="{y2}"/>"#,
                x = fmt(phase.x),
                y1 = fmt(phase.y),
                y2 = fmt(phase.y + phase.height),
            );
            let _ = write!(
                &mut out,
                r#"<text class="phase-label" x="{}" y="{}">{}</text>"#,
                fmt(phase.x + 6.0),
                fmt(phase.y + 14.0),
                escape_text(&phase.label)
            );
        }
        out.push_str("</g>");
    }

    if !scene.lanes.is_empty() {
        out.push_str(r#"<g class="lanes">"#);
        for lane in &scene.lanes {
            let _ = write!(
                &mut out,
                r#"<rect class="lane-band" x="{}" y="{}" width="{}" height="{}"/>"#,
                fmt(lane.band.x),
                fmt(lane.band.y),
                fmt(lane.band.width),
                fmt(lane.band.height)
            );
            let _ = write!(
                &mut out,
                r#"<rect class="lane-header" x="{}" y="{}" width="{}" height="{}"/>"#,
                fmt(lane.header.x),
                fmt(lane.header.y),
                fmt(lane.header.width),
                fmt(lane.header.height)
            );
            let center = lane.header.center();
            let _ = write!(
                &mut out,
                r#"<text class="lane-label" x="{}" y="{}">{}</text>"#,
                fmt(center.x),
                fmt(center.y),
                escape_text(&lane.label)
            );
        }
        out.push_str("</g>");
    }

    // Edges always render before nodes so nodes stay on top.
    out.push_str(r#"<g class="edges">"#);
    for edge in &scene.edges {
        let d = match edge.path {
            EdgePath::Line => format!(
                "M {} {} L {} {}",
                fmt(edge.from.x),
                fmt(edge.from.y),
                fmt(edge.to.x),
                fmt(edge.to.y)
            ),
            EdgePath::Quadratic { control } => format!(
                "M {} {} Q {} {} {} {}",
                fmt(edge.from.x),
                fmt(edge.from.y),
                fmt(control.x),
                fmt(control.y),
                fmt(edge.to.x),
                fmt(edge.to.y)
            ),
        };
        let marker = if edge.arrowhead {
            format!(r#" marker-end="url(#{marker_id})""#)
        } else {
            String::new()
        };
        let _ = write!(
            &mut out,
            r#"<path class="edge {}" d="{}" stroke-width="{}"{}/>"#,
            edge.css_class,
            d,
            fmt(edge.stroke_width),
            marker
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &scene.nodes {
        let _ = write!(
            &mut out,
            r#"<g class="node {}" data-node-id="{}">"#,
            node.css_class,
            escape_attr(&node.id)
        );
        write_node_shape(&mut out, node);
        write_node_label(&mut out, node);
        out.push_str("</g>");
    }
    out.push_str("</g>");

    out.push_str("</svg>");
    out
}

fn arrowhead_marker_id(options: &SvgRenderOptions) -> String {
    match &options.diagram_id {
        Some(id) => format!("{id}-arrowhead"),
        None => "arrowhead".to_string(),
    }
}

fn write_node_shape(out: &mut String, node: &SceneNode) {
    let fill = escape_attr(&node.fill);
    match node.shape {
        NodeShape::Circle => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                fmt(node.x),
                fmt(node.y),
                fmt(node.width.min(node.height) / 2.0),
                fill
            );
        }
        NodeShape::Ellipse => {
            let _ = write!(
                out,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}"/>"#,
                fmt(node.x),
                fmt(node.y),
                fmt(node.width / 2.0),
                fmt(node.height / 2.0),
                fill
            );
        }
        NodeShape::Diamond => {
            let _ = write!(
                out,
                r#"<polygon points="{},{} {},{} {},{} {},{}" fill="{}"/>"#,
                fmt(node.x),
                fmt(node.y - node.height / 2.0),
                fmt(node.x + node.width / 2.0),
                fmt(node.y),
                fmt(node.x),
                fmt(node.y + node.height / 2.0),
                fmt(node.x - node.width / 2.0),
                fmt(node.y),
                fill
            );
        }
        NodeShape::Rounded | NodeShape::Rect => {
            let rx = if node.shape == NodeShape::Rounded {
                8.0
            } else {
                0.0
            };
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
                fmt(node.x - node.width / 2.0),
                fmt(node.y - node.height / 2.0),
                fmt(node.width),
                fmt(node.height),
                fmt(rx),
                fill
            );
        }
    }
}

fn write_node_label(out: &mut String, node: &SceneNode) {
    if node.label_lines.iter().all(|l| l.is_empty()) {
        return;
    }
    let line_height = 16.0;
    let first_y = node.y - (node.label_lines.len() as f64 - 1.0) * line_height / 2.0;
    let _ = write!(
        out,
        r#"<text class="node-label" x="{}" y="{}">"#,
        fmt(node.x),
        fmt(first_y)
    );
    for (i, line) in node.label_lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            fmt(node.x),
            fmt(if i == 0 { 0.0 } else { line_height }),
            escape_text(line)
        );
    }
    out.push_str("</text>");
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Round-trippable decimal form for SVG attributes, avoiding `-0` and tiny
/// float noise from our own calculations.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}
