//! How a particle's four mirrored marks are drawn.

use serde::{Deserialize, Serialize};

/// Above this surveillance level the wall switches to motion trails.
pub const TRAIL_ABOVE: f32 = 8.5;
/// Optional lower trail threshold used by the later wall layouts.
pub const TRAIL_BELOW: f32 = 2.5;

/// What kind of marks a frame produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// One point per mirrored position.
    Points,
    /// Segments from the previous to the current mirrored position.
    Trails,
}

/// How the trail regime is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailStyle {
    /// Segments only, at full stroke width.
    LinesOnly,
    /// Points at full stroke width plus segments at half width.
    PointsWithHalfLines,
}

/// Thresholds and style selecting the render mode from the surveillance dial.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderPolicy {
    pub trail_above: f32,
    pub trail_below: Option<f32>,
    pub trail_style: TrailStyle,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        RenderPolicy {
            trail_above: TRAIL_ABOVE,
            trail_below: None,
            trail_style: TrailStyle::LinesOnly,
        }
    }
}

impl RenderPolicy {
    pub fn mode(&self, surveillance: f32) -> RenderMode {
        let low = self.trail_below.map_or(false, |t| surveillance < t);
        if surveillance > self.trail_above || low {
            RenderMode::Trails
        } else {
            RenderMode::Points
        }
    }
}
