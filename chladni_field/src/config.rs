//! Per-frame tunables and the screen geometry they are applied to.

use crate::canvas::Canvas;
use crate::field::remap;

/// Lowest value of any social dial.
pub const DIAL_MIN: f32 = 1.0;
/// Highest value of any social dial.
pub const DIAL_MAX: f32 = 10.0;

/// Hue ceiling; keeps the palette between red and purple.
pub const MAX_HUE: f32 = 260.0;

/// Snapshot of everything a particle reads during one frame.
///
/// Built once per frame by the parameter mapper and passed by value, so the
/// whole pool sees the same numbers for the duration of the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Equity dial, 1–10.  Scales ageing speed and stroke ratio.
    pub equity:       f32,
    /// Climate dial, 1–10.
    pub climate:      f32,
    /// Surveillance dial, 1–10.  Drives hue-chase strength and render mode.
    pub surveillance: f32,
    /// Upper wave number along x, 1–40.
    pub wave_m:       f32,
    /// Upper wave number along y, 1–40.
    pub wave_n:       f32,
    /// Random-walk gain, 0.001–0.05.
    pub walk_gain:    f32,
    /// Hue particles drift toward, 0–260.
    pub target_hue:   f32,
    /// Particles advanced and drawn this frame.
    pub active_count: usize,
}

impl Default for SimulationConfig {
    /// All dials centred at 5 with the matching derived values.
    fn default() -> Self {
        SimulationConfig {
            equity:       5.0,
            climate:      5.0,
            surveillance: 5.0,
            wave_m:       remap(5.0, DIAL_MIN, DIAL_MAX, 1.0, 40.0),
            wave_n:       remap(5.0, DIAL_MIN, DIAL_MAX, 1.0, 40.0),
            walk_gain:    remap(5.0, DIAL_MIN, DIAL_MAX, 0.05, 0.001),
            target_hue:   remap(5.0, DIAL_MIN, DIAL_MAX, 0.0, MAX_HUE),
            active_count: 0,
        }
    }
}

/// Canvas size in pixels.  Particles live in the top-left quadrant and are
/// mirrored into the other three.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width:  f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    /// Geometry of the surface about to be drawn on.
    pub fn of<C: Canvas + ?Sized>(canvas: &C) -> Self {
        Viewport::new(canvas.width(), canvas.height())
    }

    /// Screen offset of a unit-square position.
    #[inline]
    pub fn offset(&self, x: f32, y: f32) -> (f32, f32) {
        (self.width / 2.0 * x, self.height / 2.0 * y)
    }
}

impl Default for Viewport {
    fn default() -> Self { Viewport::new(640.0, 500.0) }
}
