//! # chladni_field
//!
//! Particle engine for the Room of Silence wall.  A fixed pool of particles
//! random-walks across a vibrating Chladni plate: the closer a particle sits
//! to a nodal line, the smaller its step.  Each particle ages, drifts toward
//! the wall's target hue and is drawn four times, mirrored across both
//! canvas midlines.
//!
//! ## Frame
//!
//! ```text
//! SimulationConfig ──► ParticlePool::step ──► Particle::advance ──► Particle::show ──► Canvas
//!                              │
//!                              └── dead (age ≤ -5) → removed, fresh particle appended
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use chladni_field::{RecordingCanvas, RenderPolicy, SimulationConfig, SimulationState};
//!
//! let cfg = SimulationConfig { active_count: 100, ..SimulationConfig::default() };
//! let mut wall = SimulationState::new(100, RenderPolicy::default(), Some(1), &cfg);
//! let mut canvas = RecordingCanvas::new(640.0, 500.0);
//!
//! let report = wall.frame(&cfg, &mut canvas);
//! assert_eq!(report.advanced, 100);
//! assert_eq!(canvas.points(), 400);
//! ```

pub mod canvas;
pub mod config;
pub mod field;
pub mod particle;
pub mod pool;
pub mod render;
pub mod stroke;

pub use canvas::{Canvas, DrawCall, Hsba, RecordingCanvas};
pub use config::{SimulationConfig, Viewport, DIAL_MAX, DIAL_MIN, MAX_HUE};
pub use field::{chladni, remap};
pub use particle::Particle;
pub use pool::{ParticlePool, SimulationState, StepReport};
pub use render::{RenderMode, RenderPolicy, TrailStyle};
pub use stroke::{stroke_width, STROKE_WIDTHS};
