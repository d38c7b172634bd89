use super::{LineCap, MarkerKind, OverlayScene, PixelScene, SegmentKind};
use std::fmt::Write;

const ARROW_MARKER_ID: &str = "arrowhead";
const DOT_MARKER_ID: &str = "dot";

/// Renders the table image with its overlay as a standalone SVG document.
///
/// `image_href` is the preview reference of the image. Pass `None` for
/// `scene` to draw the bare image (overlay hidden or nothing to draw).
pub fn render_svg(
    image_href: &str,
    width: u32,
    height: u32,
    scene: Option<&OverlayScene>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        out,
        r#"  <image href="{}" x="0" y="0" width="{width}" height="{height}" preserveAspectRatio="none"/>"#,
        escape_attr(image_href)
    );

    if let Some(scene) = scene.filter(|scene| !scene.is_empty()) {
        write_overlay(&mut out, &scene.to_pixels(width as f64, height as f64));
    }

    out.push_str("</svg>\n");
    out
}

fn write_overlay(out: &mut String, scene: &PixelScene) {
    out.push_str(r#"  <g style="filter: drop-shadow(0px 2px 4px rgba(0,0,0,0.5))">"#);
    out.push('\n');
    out.push_str("    <defs>\n");
    let _ = writeln!(
        out,
        r##"      <marker id="{ARROW_MARKER_ID}" markerWidth="6" markerHeight="6" refX="5" refY="3" orient="auto"><path d="M0,0 L0,6 L6,3 z" fill="{}"/></marker>"##,
        SegmentKind::Pocket.style().stroke
    );
    let _ = writeln!(
        out,
        r#"      <marker id="{DOT_MARKER_ID}" markerWidth="4" markerHeight="4" refX="2" refY="2"><circle cx="2" cy="2" r="2" fill="white"/></marker>"#
    );
    out.push_str("    </defs>\n");

    for segment in &scene.segments {
        let style = segment.kind.style();
        let mut attrs = format!(
            r#"x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round""#,
            num(segment.from.x),
            num(segment.from.y),
            num(segment.to.x),
            num(segment.to.y),
            style.stroke,
            num(style.width),
        );
        if let Some((on, off)) = style.dash {
            let _ = write!(attrs, r#" stroke-dasharray="{} {}""#, num(on), num(off));
        }
        if let Some(cap) = style.start_cap {
            let _ = write!(attrs, r#" marker-start="url(#{})""#, marker_id(cap));
        }
        if let Some(cap) = style.end_cap {
            let _ = write!(attrs, r#" marker-end="url(#{})""#, marker_id(cap));
        }
        let _ = writeln!(out, "    <line {attrs}/>");
    }

    for marker in &scene.markers {
        let (fill, stroke) = marker.kind.colors();
        let class = match marker.kind {
            MarkerKind::CueBall => "cue-ball",
            MarkerKind::TargetBall => "target-ball",
        };
        let _ = writeln!(
            out,
            r#"    <circle class="{class}" cx="{}" cy="{}" r="{}" fill="{fill}" stroke="{stroke}" stroke-width="2"/>"#,
            num(marker.center.x),
            num(marker.center.y),
            num(marker.radius),
        );
    }

    out.push_str("  </g>\n");
}

fn marker_id(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Dot => DOT_MARKER_ID,
        LineCap::Arrow => ARROW_MARKER_ID,
    }
}

/// Formats with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Coordinates;

    fn full_scene() -> OverlayScene {
        OverlayScene::from_positions(
            Some(Coordinates::new(30., 40.)),
            Some(Coordinates::new(60., 50.)),
            Some(Coordinates::new(90., 10.)),
        )
    }

    #[test]
    fn test_full_scene_renders_two_lines_and_two_circles() {
        let svg = render_svg("data:image/png;base64,AAAA", 1000, 500, Some(&full_scene()));

        assert_eq!(svg.matches("<line ").count(), 2);
        assert_eq!(svg.matches(r#"<circle class="#).count(), 2);
        assert!(svg.contains(r#"x1="300" y1="200" x2="600" y2="250""#));
        assert!(svg.contains(r#"marker-end="url(#arrowhead)""#));
        assert!(svg.contains(r#"stroke-dasharray="8 4""#));
        assert!(svg.contains(r#"r="15""#));
    }

    #[test]
    fn test_hidden_overlay_renders_image_only() {
        let svg = render_svg("blob:cueshot/1", 640, 480, None);
        assert!(svg.contains("<image "));
        assert!(!svg.contains("<line "));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_empty_scene_renders_no_overlay_group() {
        let svg = render_svg("blob:x", 10, 10, Some(&OverlayScene::default()));
        assert!(!svg.contains("<g "));
    }

    #[test]
    fn test_href_is_escaped() {
        let svg = render_svg(r#"blob:"a"&b"#, 10, 10, None);
        assert!(svg.contains("blob:&quot;a&quot;&amp;b"));
    }

    #[test]
    fn test_num_trims_zeros() {
        assert_eq!(num(300.0), "300");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.005_f64 + 0.001), "1.01");
        assert_eq!(num(-0.001), "0");
    }
}
