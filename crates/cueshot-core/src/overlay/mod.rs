//! Shot overlay geometry.
//!
//! The overlay is a pure function of the three optional positions in a
//! [`ShotAnalysis`]: an approach line from the cue ball to the target ball and
//! a pocket line from the target ball to the pocket, each with a highlight
//! marker on the ball it starts from. A line whose endpoints are not both known
//! is left out.

mod svg;

pub use svg::render_svg;

use crate::analysis::{Coordinates, ShotAnalysis};

/// Marker radius as a percentage of the image width.
pub const MARKER_RADIUS_PERCENT: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Cue ball to target ball.
    Approach,
    /// Target ball to pocket.
    Pocket,
}

/// Decoration drawn at a segment end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Dot,
    Arrow,
}

/// How a segment is stroked. The two kinds must stay visually distinct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub stroke: &'static str,
    pub width: f64,
    pub dash: Option<(f64, f64)>,
    pub start_cap: Option<LineCap>,
    pub end_cap: Option<LineCap>,
}

impl SegmentKind {
    pub fn style(&self) -> SegmentStyle {
        match self {
            SegmentKind::Approach => SegmentStyle {
                stroke: "white",
                width: 3.0,
                dash: Some((8.0, 4.0)),
                start_cap: Some(LineCap::Dot),
                end_cap: None,
            },
            SegmentKind::Pocket => SegmentStyle {
                stroke: "#10b981",
                width: 4.0,
                dash: None,
                start_cap: None,
                end_cap: Some(LineCap::Arrow),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub from: Coordinates,
    pub to: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    CueBall,
    TargetBall,
}

impl MarkerKind {
    /// `(fill, stroke)` colors of the highlight ring.
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            MarkerKind::CueBall => ("rgba(255, 255, 255, 0.3)", "white"),
            MarkerKind::TargetBall => ("rgba(16, 185, 129, 0.3)", "#10b981"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub at: Coordinates,
}

/// Segments and markers in percentage space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayScene {
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
}

impl OverlayScene {
    pub fn from_positions(
        cue_ball: Option<Coordinates>,
        target_ball: Option<Coordinates>,
        pocket: Option<Coordinates>,
    ) -> Self {
        let mut scene = Self::default();

        if let (Some(cue), Some(target)) = (cue_ball, target_ball) {
            scene.segments.push(Segment {
                kind: SegmentKind::Approach,
                from: cue,
                to: target,
            });
            scene.markers.push(Marker {
                kind: MarkerKind::CueBall,
                at: cue,
            });
        }

        if let (Some(target), Some(pocket)) = (target_ball, pocket) {
            scene.segments.push(Segment {
                kind: SegmentKind::Pocket,
                from: target,
                to: pocket,
            });
            scene.markers.push(Marker {
                kind: MarkerKind::TargetBall,
                at: target,
            });
        }

        scene
    }

    pub fn from_analysis(analysis: &ShotAnalysis) -> Self {
        Self::from_positions(
            analysis.cue_ball_position,
            analysis.target_ball_position,
            analysis.target_pocket_position,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.markers.is_empty()
    }

    /// Maps the scene onto an image of `width` x `height` pixels.
    pub fn to_pixels(&self, width: f64, height: f64) -> PixelScene {
        let map = |point: Coordinates| PixelPoint {
            x: point.x / 100.0 * width,
            y: point.y / 100.0 * height,
        };

        PixelScene {
            segments: self
                .segments
                .iter()
                .map(|segment| PixelSegment {
                    kind: segment.kind,
                    from: map(segment.from),
                    to: map(segment.to),
                })
                .collect(),
            markers: self
                .markers
                .iter()
                .map(|marker| PixelMarker {
                    kind: marker.kind,
                    center: map(marker.at),
                    radius: MARKER_RADIUS_PERCENT / 100.0 * width,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSegment {
    pub kind: SegmentKind,
    pub from: PixelPoint,
    pub to: PixelPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMarker {
    pub kind: MarkerKind,
    pub center: PixelPoint,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelScene {
    pub segments: Vec<PixelSegment>,
    pub markers: Vec<PixelMarker>,
}

/// Overlay visibility toggle.
///
/// Hiding the overlay never touches the analysis it is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRenderer {
    visible: bool,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// The scene to draw, or `None` when hidden or when nothing can be drawn.
    pub fn scene(&self, analysis: &ShotAnalysis) -> Option<OverlayScene> {
        if !self.visible {
            return None;
        }
        let scene = OverlayScene::from_analysis(analysis);
        (!scene.is_empty()).then_some(scene)
    }
}
