//! A single wall particle: random walk on the vibrating plate, ageing,
//! hue drift and four-fold mirrored rendering.

use rand::Rng;

use crate::canvas::{Canvas, Hsba};
use crate::config::{SimulationConfig, Viewport, MAX_HUE};
use crate::field::{chladni, remap, AMPLITUDE_A, AMPLITUDE_B};
use crate::render::{RenderMode, RenderPolicy, TrailStyle};
use crate::stroke::stroke_width;

// ════════════════════════════════════════════════════════════════════════════
// Lifecycle and motion constants
// ════════════════════════════════════════════════════════════════════════════

/// Range new particles draw their age from.
pub const BIRTH_AGE_MIN: f32 = 1000.0;
pub const BIRTH_AGE_MAX: f32 = 5000.0;

/// A particle at or below this age is recycled.
pub const DEATH_AGE: f32 = -5.0;
/// Ageing stops once the age has fallen to this floor.
pub const AGE_FLOOR: f32 = -10.0;

/// Smallest random-walk step; keeps particles on nodal lines twitching.
pub const MIN_WALK: f32 = 0.002;

/// Birth hue is drawn within this many degrees of the target hue.
pub const HUE_JITTER: f32 = 5.0;

/// Age at which saturation reaches 100.
pub const SATURATION_AGE: f32 = 500.0;

// Local wave numbers grow with distance from the plate origin: the offset
// `FIELD_REACH·x` (in canvas widths) is mapped from `[0, FIELD_SPAN]`.
const FIELD_REACH: f32 = 0.25;
const FIELD_SPAN:  f32 = 0.5;

/// Uniform sample between `a` and `b`; the bounds may come in either order
/// and may coincide.
#[inline]
fn random_between<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    a + (b - a) * rng.gen::<f32>()
}

/// The four mirror images of a screen offset across both canvas midlines.
#[inline]
pub fn quadrants(x: f32, y: f32, width: f32, height: f32) -> [(f32, f32); 4] {
    [
        (x,         y),
        (width - x, y),
        (x,         height - y),
        (width - x, height - y),
    ]
}

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct Particle {
    /// Position on the unit plate; always inside `[0, 1]²`.
    pub x:      f32,
    pub y:      f32,
    pub prev_x: f32,
    pub prev_y: f32,

    pub age: f32,

    pub hue:        f32,
    pub saturation: f32,
    pub brightness: f32,
    /// Target hue at birth minus birth hue.
    pub hue_offset: f32,

    /// `remap(birth age, 5000→1000, 0→1)`; older-born particles are thinner
    /// and age slower.
    pub stroke_factor: f32,

    step: f32,
}

impl Particle {
    /// Seed a particle at a random spot with a random age, its hue jittered
    /// around `target_hue`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, target_hue: f32) -> Self {
        let x = rng.gen::<f32>();
        let y = rng.gen::<f32>();
        let age = random_between(rng, BIRTH_AGE_MIN, BIRTH_AGE_MAX);

        let hue = random_between(
            rng,
            (target_hue - HUE_JITTER).abs(),
            (target_hue + HUE_JITTER).abs(),
        );
        let saturation = random_between(rng, 75.0, 100.0);
        let brightness = random_between(rng, 75.0, 100.0);

        Particle {
            x,
            y,
            prev_x: x,
            prev_y: y,
            age,
            hue,
            saturation,
            brightness,
            hue_offset:    target_hue - hue,
            stroke_factor: remap(age, BIRTH_AGE_MAX, BIRTH_AGE_MIN, 0.0, 1.0),
            step:          MIN_WALK,
        }
    }

    pub fn is_dead(&self) -> bool { self.age <= DEATH_AGE }

    /// Amplitude of the most recent random-walk step.
    pub fn step_size(&self) -> f32 { self.step }

    /// Screen offset of the current position on `viewport`.
    pub fn offset(&self, viewport: &Viewport) -> (f32, f32) {
        viewport.offset(self.x, self.y)
    }

    pub fn prev_offset(&self, viewport: &Viewport) -> (f32, f32) {
        viewport.offset(self.prev_x, self.prev_y)
    }

    /// Local vibration at the particle's position.
    pub fn vibration(&self, cfg: &SimulationConfig) -> f32 {
        let m = remap((FIELD_REACH * self.x).abs(), 0.0, FIELD_SPAN, 1.0, cfg.wave_m);
        let n = remap((FIELD_REACH * self.y).abs(), 0.0, FIELD_SPAN, 1.0, cfg.wave_n);
        chladni(self.x, self.y, AMPLITUDE_A, AMPLITUDE_B, m, n)
    }

    /// One random-walk step scaled by the local vibration, then ageing.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        cfg: &SimulationConfig,
        rng: &mut R,
    ) {
        self.step = (cfg.walk_gain * self.vibration(cfg).abs()).max(MIN_WALK);

        self.prev_x = self.x;
        self.prev_y = self.y;

        self.x += random_between(rng, -self.step, self.step);
        self.y += random_between(rng, -self.step, self.step);

        if self.age > AGE_FLOOR {
            self.age -= self.stroke_factor * cfg.equity;
        }

        self.x = self.x.clamp(0.0, 1.0);
        self.y = self.y.clamp(0.0, 1.0);
    }

    /// Chase the target hue; surveillance scales how hard the birth offset
    /// overshoots.  Saturation follows the remaining age.
    pub fn drift_color(&mut self, cfg: &SimulationConfig) {
        let chase = self.hue_offset * remap(cfg.surveillance, 1.0, 10.0, 10.0, 1.0);
        let gap = (cfg.target_hue - self.hue).abs();

        let hue = if self.hue > cfg.target_hue {
            self.hue - gap + chase
        } else {
            self.hue + gap + chase
        };
        self.hue = hue.abs().clamp(0.0, MAX_HUE);

        self.saturation = remap(self.age, 0.0, SATURATION_AGE, 0.0, 100.0).clamp(0.0, 100.0);
    }

    pub fn stroke_ratio(&self, equity: f32) -> f32 { self.stroke_factor * equity }

    pub fn stroke_width(&self, equity: f32) -> u32 {
        stroke_width(equity, self.stroke_ratio(equity))
    }

    pub fn color(&self) -> Hsba {
        Hsba::opaque(self.hue, self.saturation, self.brightness)
    }

    /// Update color and emit the four mirrored marks.  Geometry comes from
    /// the canvas being drawn on.
    pub fn show<C: Canvas + ?Sized>(
        &mut self,
        cfg:    &SimulationConfig,
        policy: &RenderPolicy,
        canvas: &mut C,
    ) {
        self.drift_color(cfg);

        let weight = self.stroke_width(cfg.equity) as f32;
        let viewport = Viewport::of(canvas);
        let (w, h) = (viewport.width, viewport.height);
        let (x, y) = self.offset(&viewport);
        let here = quadrants(x, y, w, h);

        canvas.stroke(self.color());

        match (policy.mode(cfg.surveillance), policy.trail_style) {
            (RenderMode::Points, _) => {
                canvas.stroke_weight(weight);
                for (x, y) in here { canvas.point(x, y); }
            }
            (RenderMode::Trails, style) => {
                let (px, py) = self.prev_offset(&viewport);
                let before = quadrants(px, py, w, h);
                if style == TrailStyle::PointsWithHalfLines {
                    canvas.stroke_weight(weight);
                    for (x, y) in here { canvas.point(x, y); }
                    canvas.stroke_weight(weight * 0.5);
                } else {
                    canvas.stroke_weight(weight);
                }
                for ((x1, y1), (x2, y2)) in here.into_iter().zip(before) {
                    canvas.line(x1, y1, x2, y2);
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCall, RecordingCanvas};
    use crate::stroke::STROKE_WIDTHS;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng { SmallRng::seed_from_u64(0x5EED) }

    fn dials(equity: f32, climate: f32, surveillance: f32) -> SimulationConfig {
        SimulationConfig {
            equity,
            climate,
            surveillance,
            wave_m:       remap(equity, 1.0, 10.0, 1.0, 40.0),
            wave_n:       remap(surveillance, 1.0, 10.0, 1.0, 40.0),
            walk_gain:    remap(climate, 1.0, 10.0, 0.05, 0.001),
            target_hue:   remap(climate, 1.0, 10.0, 0.0, 260.0),
            active_count: 1,
        }
    }

    #[test]
    fn spawn_within_birth_ranges() {
        let mut r = rng();
        for _ in 0..500 {
            let p = Particle::spawn(&mut r, 130.0);
            assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
            assert!((BIRTH_AGE_MIN..=BIRTH_AGE_MAX).contains(&p.age));
            assert!((125.0..=135.0).contains(&p.hue));
            assert!((0.0..=1.0).contains(&p.stroke_factor));
            assert!((p.hue_offset - (130.0 - p.hue)).abs() < 1e-4);
            assert_eq!((p.prev_x, p.prev_y), (p.x, p.y));
        }
    }

    #[test]
    fn spawn_at_zero_target_hue() {
        // |0-5| == |0+5|: degenerate range must not panic
        let p = Particle::spawn(&mut rng(), 0.0);
        assert_eq!(p.hue, 5.0);
        assert_eq!(p.hue_offset, -5.0);
    }

    #[test]
    fn advance_keeps_particle_on_plate() {
        let mut r = rng();
        let mut cfg = dials(5.0, 1.0, 5.0);
        cfg.walk_gain = 0.5;
        for _ in 0..200 {
            let mut p = Particle::spawn(&mut r, 0.0);
            p.x = 1.0;
            p.y = 0.0;
            for _ in 0..20 {
                p.advance(&cfg, &mut r);
                assert!((0.0..=1.0).contains(&p.x), "x = {}", p.x);
                assert!((0.0..=1.0).contains(&p.y), "y = {}", p.y);
            }
        }
    }

    #[test]
    fn node_still_walks_minimum() {
        let mut r = rng();
        let cfg = dials(5.0, 5.0, 5.0);
        let mut p = Particle::spawn(&mut r, 0.0);
        p.x = 0.0;
        p.y = 0.5;
        assert!(p.vibration(&cfg).abs() < 1e-6);
        p.advance(&cfg, &mut r);
        assert_eq!(p.step_size(), MIN_WALK);
        assert!(p.x <= MIN_WALK + 1e-6);
        assert!((p.y - 0.5).abs() <= MIN_WALK + 1e-6);
        assert_eq!((p.prev_x, p.prev_y), (0.0, 0.5));
    }

    #[test]
    fn ageing_scales_with_equity() {
        let mut r = rng();
        let mut p = Particle::spawn(&mut r, 0.0);
        p.age = 1000.0;
        p.stroke_factor = 0.5;
        p.advance(&dials(8.0, 5.0, 5.0), &mut r);
        assert!((p.age - 996.0).abs() < 1e-4);
    }

    #[test]
    fn ageing_stops_at_floor() {
        let mut r = rng();
        let cfg = dials(10.0, 5.0, 5.0);
        let mut p = Particle::spawn(&mut r, 0.0);
        p.age = -10.0;
        p.stroke_factor = 1.0;
        p.advance(&cfg, &mut r);
        assert_eq!(p.age, -10.0);
        assert!(p.is_dead());
    }

    #[test]
    fn offsets_track_positions() {
        let mut r = rng();
        let vp = Viewport::new(200.0, 100.0);
        let mut p = Particle::spawn(&mut r, 0.0);
        p.x = 0.5;
        p.y = 1.0;
        p.prev_x = 0.25;
        p.prev_y = 0.5;
        assert_eq!(p.offset(&vp), (50.0, 50.0));
        assert_eq!(p.prev_offset(&vp), (25.0, 25.0));
    }

    #[test]
    fn hue_chases_target() {
        let mut p = Particle::spawn(&mut rng(), 130.0);
        p.hue = 128.0;
        p.hue_offset = 2.0;
        let mut cfg = dials(5.0, 5.0, 5.0);
        cfg.target_hue = 130.0;

        // surveillance 5 → overshoot factor 6
        p.drift_color(&cfg);
        assert!((p.hue - 142.0).abs() < 1e-3, "hue = {}", p.hue);

        // above the target: lands on target + offset·factor
        p.hue_offset = 2.0;
        cfg.surveillance = 10.0;
        p.drift_color(&cfg);
        assert!((p.hue - 132.0).abs() < 1e-3, "hue = {}", p.hue);
    }

    #[test]
    fn hue_clamped_to_palette() {
        let mut p = Particle::spawn(&mut rng(), 260.0);
        p.hue = 200.0;
        p.hue_offset = 40.0;
        let mut cfg = dials(5.0, 10.0, 1.0);
        cfg.target_hue = 260.0;
        p.drift_color(&cfg);
        assert_eq!(p.hue, MAX_HUE);
    }

    #[test]
    fn saturation_follows_age() {
        let cfg = dials(5.0, 5.0, 5.0);
        let mut p = Particle::spawn(&mut rng(), 130.0);
        p.age = 250.0;
        p.drift_color(&cfg);
        assert!((p.saturation - 50.0).abs() < 1e-3);
        p.age = 4000.0;
        p.drift_color(&cfg);
        assert_eq!(p.saturation, 100.0);
        p.age = -5.0;
        p.drift_color(&cfg);
        assert_eq!(p.saturation, 0.0);
    }

    fn point_positions(canvas: &RecordingCanvas) -> Vec<(f32, f32)> {
        canvas.calls.iter().map(|c| match c {
            DrawCall::Point { x, y, .. } => (*x, *y),
            other => panic!("unexpected {:?}", other),
        }).collect()
    }

    #[test]
    fn show_draws_four_mirrored_points() {
        let mut canvas = RecordingCanvas::new(640.0, 500.0);
        let mut p = Particle::spawn(&mut rng(), 130.0);
        p.x = 0.2;
        p.y = 0.4;

        p.show(&dials(5.0, 5.0, 5.0), &RenderPolicy::default(), &mut canvas);

        assert_eq!(canvas.points(), 4);
        assert_eq!(canvas.lines(), 0);
        let xs = point_positions(&canvas);
        assert_eq!(xs[0], (64.0, 100.0));
        assert_eq!(xs[1], (576.0, 100.0));
        assert_eq!(xs[2], (64.0, 400.0));
        assert_eq!(xs[3], (576.0, 400.0));
    }

    #[test]
    fn mirroring_follows_canvas_size() {
        // a half-size surface: the plate corner lands on the canvas centre
        let mut canvas = RecordingCanvas::new(320.0, 250.0);
        let mut p = Particle::spawn(&mut rng(), 130.0);
        p.x = 1.0;
        p.y = 1.0;
        p.show(&dials(5.0, 5.0, 5.0), &RenderPolicy::default(), &mut canvas);
        assert!(point_positions(&canvas).iter().all(|&pt| pt == (160.0, 125.0)));

        canvas.clear();
        p.x = 0.2;
        p.y = 0.4;
        p.show(&dials(5.0, 5.0, 5.0), &RenderPolicy::default(), &mut canvas);
        assert_eq!(
            point_positions(&canvas),
            vec![(32.0, 50.0), (288.0, 50.0), (32.0, 200.0), (288.0, 200.0)]
        );
    }

    #[test]
    fn high_surveillance_draws_trail_segments() {
        let mut r = rng();
        let vp = Viewport::default();
        let mut canvas = RecordingCanvas::new(vp.width, vp.height);
        let cfg = dials(5.0, 5.0, 9.0);
        let mut p = Particle::spawn(&mut r, 130.0);
        p.advance(&cfg, &mut r);
        p.show(&cfg, &RenderPolicy::default(), &mut canvas);

        assert_eq!(canvas.lines(), 4);
        assert_eq!(canvas.points(), 0);
        match &canvas.calls[0] {
            DrawCall::Line { x1, y1, x2, y2, .. } => {
                assert_eq!((*x1, *y1), p.offset(&vp));
                assert_eq!((*x2, *y2), p.prev_offset(&vp));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn points_with_half_lines_style() {
        let mut canvas = RecordingCanvas::new(640.0, 500.0);
        let policy = RenderPolicy {
            trail_style: TrailStyle::PointsWithHalfLines,
            ..RenderPolicy::default()
        };
        let cfg = dials(9.0, 5.0, 9.5);
        let mut p = Particle::spawn(&mut rng(), 130.0);
        p.show(&cfg, &policy, &mut canvas);

        assert_eq!(canvas.points(), 4);
        assert_eq!(canvas.lines(), 4);
        let full = canvas.calls[0].weight();
        assert!(STROKE_WIDTHS.contains(&(full as u32)));
        assert_eq!(canvas.calls[4].weight(), full * 0.5);
    }

    #[test]
    fn stroke_width_in_fixed_set() {
        let mut r = rng();
        for _ in 0..300 {
            let p = Particle::spawn(&mut r, 100.0);
            for e in 1..=10 {
                assert!(STROKE_WIDTHS.contains(&p.stroke_width(e as f32)));
            }
            let w = p.stroke_width(1.0);
            assert!(w == 2 || w == 4);
        }
    }
}
