//! Fixed-capacity particle pool and the per-frame simulation driver.
//!
//! The pool never shrinks: a particle whose age has run out is removed and a
//! freshly seeded one is appended in the same frame.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::canvas::Canvas;
use crate::config::SimulationConfig;
use crate::particle::Particle;
use crate::render::RenderPolicy;

/// Outcome of one pool step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles moved and drawn.
    pub advanced: usize,
    /// Particles that died and were replaced.
    pub recycled: usize,
}

// ════════════════════════════════════════════════════════════════════════════
// ParticlePool
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity:  usize,
}

impl ParticlePool {
    /// Allocate `capacity` particles with randomized state.
    pub fn new<R: Rng + ?Sized>(
        capacity: usize,
        cfg:      &SimulationConfig,
        rng:      &mut R,
    ) -> Self {
        let particles = (0..capacity)
            .map(|_| Particle::spawn(rng, cfg.target_hue))
            .collect();
        ParticlePool { particles, capacity }
    }

    pub fn capacity(&self) -> usize { self.capacity }
    pub fn len(&self)      -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool  { self.particles.is_empty() }

    pub fn particles(&self) -> &[Particle] { &self.particles }

    /// Advance and draw the first `cfg.active_count` particles.
    ///
    /// Iterates in reverse index order: a dead particle at `i` is removed and
    /// its replacement pushed onto the end, which leaves every index below
    /// `i` untouched.  Particles past `active_count` sit out the frame.
    /// Screen positions are taken from `canvas`.
    pub fn step<R, C>(
        &mut self,
        cfg:      &SimulationConfig,
        policy:   &RenderPolicy,
        canvas:   &mut C,
        rng:      &mut R,
    ) -> StepReport
    where
        R: Rng + ?Sized,
        C: Canvas + ?Sized,
    {
        let active = cfg.active_count.min(self.particles.len());
        let mut report = StepReport { advanced: active, recycled: 0 };

        for i in (0..active).rev() {
            let p = &mut self.particles[i];
            p.advance(cfg, rng);
            p.show(cfg, policy, canvas);

            if p.is_dead() {
                self.particles.remove(i);
                self.particles.push(Particle::spawn(rng, cfg.target_hue));
                report.recycled += 1;
            }
        }

        if report.recycled > 0 {
            trace!(recycled = report.recycled, active, "recycled dead particles");
        }
        report
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimulationState: everything one wall needs between frames
// ════════════════════════════════════════════════════════════════════════════

/// The pool together with its render policy and random source.
#[derive(Debug)]
pub struct SimulationState {
    pool:     ParticlePool,
    policy:   RenderPolicy,
    rng:      SmallRng,
    frames:   u64,
}

impl SimulationState {
    pub fn new(
        capacity: usize,
        policy:   RenderPolicy,
        seed:     Option<u64>,
        initial:  &SimulationConfig,
    ) -> Self {
        let mut rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None    => SmallRng::from_entropy(),
        };
        let pool = ParticlePool::new(capacity, initial, &mut rng);
        SimulationState { pool, policy, rng, frames: 0 }
    }

    /// Run one frame: step the pool against `cfg`, drawing onto `canvas`.
    pub fn frame<C: Canvas + ?Sized>(&mut self, cfg: &SimulationConfig, canvas: &mut C) -> StepReport {
        self.frames += 1;
        self.pool.step(cfg, &self.policy, canvas, &mut self.rng)
    }

    pub fn pool(&self)   -> &ParticlePool { &self.pool }
    pub fn policy(&self) -> &RenderPolicy { &self.policy }
    pub fn frames(&self) -> u64           { self.frames }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
