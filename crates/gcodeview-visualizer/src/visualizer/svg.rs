//! SVG scene export.

use tracing::debug;

use super::projector::{Projection, SegmentStyle};
use super::viewport::ScreenPoint;

const NODE_RADIUS: f64 = 4.0;
const OVERLAP_RING_RADIUS: f64 = 6.0;
const LABEL_OFFSET_Y: f64 = 10.0;

fn segment_path(projection: &Projection, style: SegmentStyle) -> String {
    let mut path = String::with_capacity(projection.segments.len() * 30);
    let mut last: Option<ScreenPoint> = None;

    for segment in projection.segments.iter().filter(|s| s.style == style) {
        if !segment.start.is_finite() || !segment.end.is_finite() {
            last = None;
            continue;
        }
        if last != Some(segment.start) {
            path.push_str(&format!("M {:.2} {:.2} ", segment.start.x, segment.start.y));
        }
        path.push_str(&format!("L {:.2} {:.2} ", segment.end.x, segment.end.y));
        last = Some(segment.end);
    }
    path.trim_end().to_string()
}

/// Render the projected scene as a standalone SVG document.
pub fn render_svg(projection: &Projection, width: f64, height: f64) -> String {
    let mut lines = vec![format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">"#,
        w = width,
        h = height
    )];

    let rapid = segment_path(projection, SegmentStyle::RapidDashed);
    if !rapid.is_empty() {
        lines.push(format!(
            r#"  <path d="{}" fill="none" stroke="{}" stroke-dasharray="5 5"/>"#,
            rapid,
            SegmentStyle::RapidDashed.color()
        ));
    }
    let linear = segment_path(projection, SegmentStyle::LinearSolid);
    if !linear.is_empty() {
        lines.push(format!(
            r#"  <path d="{}" fill="none" stroke="{}"/>"#,
            linear,
            SegmentStyle::LinearSolid.color()
        ));
    }

    for marker in &projection.markers {
        let (x, y) = (marker.position.x, marker.position.y);
        let fill = if marker.overlap { "#ff5500" } else { "red" };
        lines.push(format!(
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            x, y, NODE_RADIUS, fill
        ));
        if marker.overlap {
            lines.push(format!(
                r##"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="none" stroke="#ff5500"/>"##,
                x, y, OVERLAP_RING_RADIUS
            ));
        }
        lines.push(format!(
            r#"  <text x="{:.2}" y="{:.2}" font-size="12" text-anchor="middle">{}</text>"#,
            x,
            y - LABEL_OFFSET_Y,
            marker.label
        ));
        if let Some(badge) = &marker.badge {
            lines.push(format!(
                r##"  <text x="{:.2}" y="{:.2}" font-size="10" fill="#cc0000">{}</text>"##,
                x + 10.0,
                y - 15.0,
                badge
            ));
        }
    }

    lines.push("</svg>".to_string());
    let mut svg = lines.join("\n");
    svg.push('\n');
    debug!(
        "Rendered SVG: {} segments, {} markers, {} bytes",
        projection.segments.len(),
        projection.markers.len(),
        svg.len()
    );
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcode::interpret;
    use crate::visualizer::{project, RenderTransform};

    #[test]
    fn test_render_scene() {
        let projection = project(
            &interpret("G0 X0 Y0 Z5\nG1 X10\nG1 X0"),
            &RenderTransform::new(5.0, 400.0, 300.0),
        );
        let svg = render_svg(&projection, 800.0, 600.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"stroke="gray" stroke-dasharray="5 5""#));
        assert!(svg.contains("M 400.00 300.00 L 450.00 300.00 L 400.00 300.00"));
        assert!(svg.contains(">+1</text>"));
    }

    #[test]
    fn test_empty_scene() {
        let svg = render_svg(&Projection::default(), 100.0, 50.0);
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(!svg.contains("<path"));
    }
}
