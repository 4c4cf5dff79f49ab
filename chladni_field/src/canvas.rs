//! The drawing surface the particles emit marks onto.
//!
//! The core never owns pixels.  Anything that implements [`Canvas`] (a
//! software framebuffer, a vector recorder, a GPU batcher) can host the wall.

/// Color in HSB space using the installation's ranges:
/// hue 0–360, saturation 0–100, brightness 0–100, alpha 0–100.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsba {
    pub hue:        f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha:      f32,
}

impl Hsba {
    pub const fn new(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        Hsba { hue, saturation, brightness, alpha }
    }

    pub const fn opaque(hue: f32, saturation: f32, brightness: f32) -> Self {
        Hsba::new(hue, saturation, brightness, 100.0)
    }
}

/// Primitive draw operations consumed by the particle renderer.
pub trait Canvas {
    fn width(&self)  -> f32;
    fn height(&self) -> f32;

    /// Set the color for subsequent marks.
    fn stroke(&mut self, color: Hsba);
    /// Set the pen diameter in pixels for subsequent marks.
    fn stroke_weight(&mut self, weight: f32);

    fn point(&mut self, x: f32, y: f32);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
}

// ════════════════════════════════════════════════════════════════════════════
// RecordingCanvas: captures draw calls instead of rasterizing them
// ════════════════════════════════════════════════════════════════════════════

/// A single recorded mark, with the pen state that was active when it was made.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Point { x: f32, y: f32, weight: f32, color: Hsba },
    Line  { x1: f32, y1: f32, x2: f32, y2: f32, weight: f32, color: Hsba },
}

impl DrawCall {
    pub fn weight(&self) -> f32 {
        match self {
            DrawCall::Point { weight, .. } | DrawCall::Line { weight, .. } => *weight,
        }
    }

    pub fn is_line(&self) -> bool { matches!(self, DrawCall::Line { .. }) }
}

/// Canvas that stores every mark; used by headless runs and tests.
#[derive(Debug)]
pub struct RecordingCanvas {
    width:  f32,
    height: f32,
    color:  Hsba,
    weight: f32,
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        RecordingCanvas {
            width,
            height,
            color:  Hsba::opaque(0.0, 0.0, 100.0),
            weight: 1.0,
            calls:  Vec::new(),
        }
    }

    pub fn clear(&mut self) { self.calls.clear(); }

    pub fn points(&self) -> usize { self.calls.iter().filter(|c| !c.is_line()).count() }
    pub fn lines(&self)  -> usize { self.calls.iter().filter(|c| c.is_line()).count() }
}

impl Canvas for RecordingCanvas {
    fn width(&self)  -> f32 { self.width }
    fn height(&self) -> f32 { self.height }

    fn stroke(&mut self, color: Hsba)       { self.color = color; }
    fn stroke_weight(&mut self, weight: f32) { self.weight = weight; }

    fn point(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::Point { x, y, weight: self.weight, color: self.color });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.calls.push(DrawCall::Line {
            x1, y1, x2, y2,
            weight: self.weight,
            color:  self.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_pen_state() {
        let mut c = RecordingCanvas::new(100.0, 80.0);
        c.stroke(Hsba::opaque(120.0, 50.0, 90.0));
        c.stroke_weight(6.0);
        c.point(1.0, 2.0);
        c.stroke_weight(2.0);
        c.line(0.0, 0.0, 5.0, 5.0);

        assert_eq!(c.points(), 1);
        assert_eq!(c.lines(), 1);
        assert_eq!(c.calls[0].weight(), 6.0);
        assert_eq!(c.calls[1].weight(), 2.0);
        match &c.calls[1] {
            DrawCall::Line { color, .. } => assert_eq!(color.hue, 120.0),
            other => panic!("expected line, got {:?}", other),
        }
    }
}
