//! ARGB framebuffer that rasterizes the wall's marks.

use chladni_field::{Canvas, Hsba};

use crate::color::{blend, gray, hsb_to_argb};

/// Background gray of the wall.
pub const WIPE_GRAY: u8 = 10;
/// Opacity (0–255) of the per-frame wipe; low values leave a fading history.
pub const WIPE_ALPHA: u8 = 10;

/// A `width × height` ARGB pixel buffer, row-major, suitable for `minifb`.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
    pen:    u32,
    alpha:  f32,
    weight: f32,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            buf:    vec![gray(WIPE_GRAY); width * height],
            pen:    gray(255),
            alpha:  1.0,
            weight: 1.0,
        }
    }

    pub fn buffer(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.buf[y * self.width + x])
        } else {
            None
        }
    }

    pub fn fill(&mut self, color: u32) { self.buf.fill(color); }

    /// Lay a translucent gray over the whole frame.  Marks from earlier
    /// frames fade instead of vanishing.
    pub fn wipe(&mut self, level: u8, alpha: u8) {
        let target = gray(level);
        let t = alpha as f32 / 255.0;
        for px in &mut self.buf {
            *px = blend(*px, target, t);
        }
    }

    #[inline]
    fn plot(&mut self, x: isize, y: isize) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.buf[idx] = if self.alpha >= 1.0 {
            self.pen
        } else {
            blend(self.buf[idx], self.pen, self.alpha)
        };
    }

    /// Round pen tip of the current weight centred on `(cx, cy)`.
    fn stamp(&mut self, cx: f32, cy: f32) {
        let r = self.weight / 2.0;
        if r <= 0.75 {
            self.plot(cx.floor() as isize, cy.floor() as isize);
            return;
        }
        let r2 = r * r;
        let x0 = (cx - r).floor() as isize;
        let x1 = (cx + r).ceil() as isize;
        let y0 = (cy - r).floor() as isize;
        let y1 = (cy + r).ceil() as isize;
        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.plot(x, y);
                }
            }
        }
    }
}

impl Canvas for Framebuffer {
    fn width(&self)  -> f32 { self.width as f32 }
    fn height(&self) -> f32 { self.height as f32 }

    fn stroke(&mut self, color: Hsba) {
        self.pen   = hsb_to_argb(color);
        self.alpha = (color.alpha / 100.0).clamp(0.0, 1.0);
    }

    fn stroke_weight(&mut self, weight: f32) {
        self.weight = weight.max(0.0);
    }

    fn point(&mut self, x: f32, y: f32) {
        self.stamp(x, y);
    }

    /// Thick segment: pen tips stamped at one-pixel spacing.
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let (dx, dy) = (x2 - x1, y2 - y1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let n = steps as f32;
        for i in 0..=steps {
            let k = i as f32;
            self.stamp(x1 + dx * k / n, y1 + dy * k / n);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::channels;

    const RED: Hsba = Hsba::opaque(0.0, 100.0, 100.0);

    #[test]
    fn starts_at_wipe_gray() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.buffer().len(), 12);
        assert!(fb.buffer().iter().all(|&p| p == gray(WIPE_GRAY)));
    }

    #[test]
    fn thin_point_sets_single_pixel() {
        let mut fb = Framebuffer::new(10, 10);
        fb.stroke(RED);
        fb.stroke_weight(1.0);
        fb.point(3.4, 7.9);
        assert_eq!(fb.pixel(3, 7), Some(0xFFFF0000));
        let lit = fb.buffer().iter().filter(|&&p| p == 0xFFFF0000).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn wide_point_is_round() {
        let mut fb = Framebuffer::new(40, 40);
        fb.stroke(RED);
        fb.stroke_weight(10.0);
        fb.point(20.0, 20.0);
        assert_eq!(fb.pixel(20, 20), Some(0xFFFF0000));
        assert_eq!(fb.pixel(16, 20), Some(0xFFFF0000));
        // corner of the bounding box stays clear
        assert_eq!(fb.pixel(15, 15), Some(gray(WIPE_GRAY)));
        let lit = fb.buffer().iter().filter(|&&p| p == 0xFFFF0000).count();
        assert!(lit > 60 && lit < 100, "lit = {lit}");
    }

    #[test]
    fn marks_off_canvas_are_clipped() {
        let mut fb = Framebuffer::new(8, 8);
        fb.stroke(RED);
        fb.stroke_weight(50.0);
        fb.point(-30.0, -30.0);
        fb.point(7.5, 7.5);
        fb.line(-100.0, 4.0, 100.0, 4.0);
        assert_eq!(fb.buffer().len(), 64);
    }

    #[test]
    fn line_covers_both_ends() {
        let mut fb = Framebuffer::new(20, 5);
        fb.stroke(RED);
        fb.stroke_weight(1.0);
        fb.line(1.0, 2.0, 15.0, 2.0);
        for x in 1..=15 {
            assert_eq!(fb.pixel(x, 2), Some(0xFFFF0000), "x = {x}");
        }
        assert_eq!(fb.pixel(0, 2), Some(gray(WIPE_GRAY)));
        assert_eq!(fb.pixel(16, 2), Some(gray(WIPE_GRAY)));
    }

    #[test]
    fn degenerate_line_is_a_point() {
        let mut fb = Framebuffer::new(5, 5);
        fb.stroke(RED);
        fb.line(2.0, 2.0, 2.0, 2.0);
        assert_eq!(fb.pixel(2, 2), Some(0xFFFF0000));
    }

    #[test]
    fn translucent_pen_blends() {
        let mut fb = Framebuffer::new(3, 3);
        fb.fill(0xFF000000);
        fb.stroke(Hsba::new(0.0, 100.0, 100.0, 50.0));
        fb.point(1.0, 1.0);
        let (r, g, b) = channels(fb.pixel(1, 1).unwrap_or(0));
        assert_eq!((r, g, b), (128, 0, 0));
    }

    #[test]
    fn wipe_fades_toward_background() {
        let mut fb = Framebuffer::new(2, 2);
        fb.fill(gray(255));
        fb.wipe(WIPE_GRAY, WIPE_ALPHA);
        let (r, _, _) = channels(fb.pixel(0, 0).unwrap_or(0));
        assert!(r < 255 && r > 240, "r = {r}");
        for _ in 0..400 { fb.wipe(WIPE_GRAY, WIPE_ALPHA); }
        let (r, g, b) = channels(fb.pixel(1, 1).unwrap_or(0));
        // 8-bit rounding leaves a faint ghost a few levels above the wipe gray
        assert!(r <= WIPE_GRAY as u32 + 13 && r == g && g == b, "r = {r}");
    }

    #[test]
    fn opaque_wipe_clears() {
        let mut fb = Framebuffer::new(2, 2);
        fb.fill(gray(200));
        fb.wipe(0, 255);
        assert!(fb.buffer().iter().all(|&p| p == gray(0)));
    }
}
