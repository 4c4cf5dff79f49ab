//! Top-level application state and frame loop.
//!
//! `AppState` owns the `ParameterMapper` and the `SimulationState`.  Each
//! frame it folds the queued control samples into the mapper, derives the
//! frame's config and steps the pool onto the wall canvas.

use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use chladni_field::{Canvas, RenderMode, RenderPolicy, SimulationState, StepReport};
use serde::{Deserialize, Serialize};
use social_dials::{
    control_queue, ControlReceiver, ControlSample, ControlValues, ParameterMapper,
    WaveDirection, DEFAULT_QUEUE_DEPTH,
};
use thiserror::Error;
use tracing::{debug, info};
use wall_canvas::{Framebuffer, WIPE_ALPHA, WIPE_GRAY};

use crate::controls::{spawn_control_source, LineFeedSource, SimControlSource, SimInput};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum AppError {
    #[error("window: {0}")]
    Window(#[from] minifb::Error),
    #[error("reading config {path}: {source}")]
    ConfigIo {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing config {path}: {source}")]
    ConfigParse {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.  Every field has a default, so a
/// config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Particles in the pool.
    pub capacity:     usize,
    pub width:        usize,
    pub height:       usize,
    pub fps:          u32,
    /// Fixed seed for a reproducible wall; random when absent.
    pub seed:         Option<u64>,
    pub wave_n:       WaveDirection,
    pub render:       RenderPolicy,
    /// Starting dial positions (1–10).
    pub equity:       f32,
    pub climate:      f32,
    pub surveillance: f32,
    /// Starting number of moving particles; the whole pool when absent.
    pub active:       Option<usize>,
    /// Also read control lines from stdin.
    pub stdin:        bool,
    pub queue_depth:  usize,
    pub hud:          bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            capacity:     10_000,
            width:        640,
            height:       500,
            fps:          30,
            seed:         None,
            wave_n:       WaveDirection::default(),
            render:       RenderPolicy::default(),
            equity:       5.0,
            climate:      5.0,
            surveillance: 5.0,
            active:       None,
            stdin:        false,
            queue_depth:  DEFAULT_QUEUE_DEPTH,
            hud:          true,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn start_values(&self) -> ControlValues {
        ControlValues {
            equity:         self.equity,
            climate:        self.climate,
            surveillance:   self.surveillance,
            particle_count: self.active.unwrap_or(self.capacity),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    mapper:      ParameterMapper,
    sim:         SimulationState,
    recycled:    u64,

    // ── status line shown in the HUD ─────────────────────────────────────
    pub status:  String,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let mapper = ParameterMapper::new(cfg.capacity, cfg.wave_n)
            .with_values(cfg.start_values());
        let sim = SimulationState::new(
            cfg.capacity,
            cfg.render,
            cfg.seed,
            &mapper.config(),
        );
        let mut app = AppState {
            mapper,
            sim,
            recycled: 0,
            status:   String::new(),
        };
        app.refresh_status();
        app
    }

    // ── controls ─────────────────────────────────────────────────────────

    /// Apply one sample immediately.
    pub fn handle_sample(&mut self, sample: ControlSample) -> bool {
        self.mapper.apply(sample)
    }

    /// Fold everything queued since the last frame into the mapper.
    pub fn drain_controls(&mut self, rx: &ControlReceiver) -> usize {
        let applied = self.mapper.drain(rx);
        if applied > 0 {
            debug!(applied, values = ?self.mapper.values(), "controls updated");
        }
        applied
    }

    // ── per-frame tick ───────────────────────────────────────────────────

    /// Step the pool once against the current dials, drawing onto `canvas`.
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> StepReport {
        let cfg = self.mapper.config();
        let step = self.sim.frame(&cfg, canvas);
        self.recycled += step.recycled as u64;
        self.refresh_status();
        step
    }

    fn refresh_status(&mut self) {
        let v = self.mapper.values();
        let mode = match self.sim.policy().mode(v.surveillance) {
            RenderMode::Points => "points",
            RenderMode::Trails => "trails",
        };
        self.status = format!(
            "equity {:.1}  climate {:.1}  surveil {:.1}  count {}/{}  {}",
            v.equity,
            v.climate,
            v.surveillance,
            v.particle_count,
            self.mapper.capacity(),
            mode,
        );
    }

    // ── accessors for the render loop ────────────────────────────────────

    pub fn mapper(&self)      -> &ParameterMapper  { &self.mapper }
    pub fn sim(&self)         -> &SimulationState  { &self.sim }
    pub fn recycled(&self)    -> u64               { self.recycled }
    pub fn palm_x(&self)      -> Option<f32>       { self.mapper.palm_x() }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the windowed loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the wall in a window until it is closed or Escape is pressed.
///
/// The keyboard slider emulator always runs; the stdin feed joins it when
/// `cfg.stdin` is set.  Both push into the same bounded queue.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let mut app = AppState::new(&cfg);

    // ── control sources ──────────────────────────────────────────────────
    let (ctl_tx, ctl_rx) = control_queue(cfg.queue_depth);
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    spawn_control_source(
        SimControlSource::new(sim_rx, *app.mapper().values(), cfg.capacity),
        ctl_tx.clone(),
    );
    if cfg.stdin {
        spawn_control_source(LineFeedSource::new(BufReader::new(io::stdin())), ctl_tx.clone());
    }
    drop(ctl_tx);

    // ── window ───────────────────────────────────────────────────────────
    let mut vis = Visualizer::new(cfg.width, cfg.height, cfg.fps, sim_tx)?;
    vis.set_hud(cfg.hud);

    info!(
        capacity = cfg.capacity,
        width = cfg.width,
        height = cfg.height,
        fps = cfg.fps,
        stdin = cfg.stdin,
        "wall open"
    );

    // ── main loop ────────────────────────────────────────────────────────
    while vis.is_open() {
        if !vis.poll_input() { break; }

        app.drain_controls(&ctl_rx);

        let field = vis.field_mut();
        field.wipe(WIPE_GRAY, WIPE_ALPHA);
        app.tick(field);

        vis.present(&app.status, app.palm_x())?;
    }

    info!(frames = app.sim().frames(), recycled = app.recycled(), "wall closed");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// run_headless(): no window
// ════════════════════════════════════════════════════════════════════════════

/// Totals from a headless run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub frames:    u64,
    pub recycled:  u64,
    pub particles: usize,
}

/// Step the wall `frames` times into an offscreen framebuffer, as fast as
/// possible.  Control samples from `controls` are applied before each frame.
pub fn run_headless(
    cfg:      &AppConfig,
    frames:   u64,
    controls: Option<&ControlReceiver>,
) -> HeadlessSummary {
    let mut app = AppState::new(cfg);
    let mut field = Framebuffer::new(cfg.width, cfg.height);

    for frame in 0..frames {
        if let Some(rx) = controls {
            app.drain_controls(rx);
        }
        field.wipe(WIPE_GRAY, WIPE_ALPHA);
        let step = app.tick(&mut field);
        if frame % 300 == 0 {
            debug!(frame, advanced = step.advanced, recycled = step.recycled, "headless frame");
        }
    }

    HeadlessSummary {
        frames:    app.sim().frames(),
        recycled:  app.recycled(),
        particles: app.sim().pool().len(),
    }
}

/// Headless run fed from stdin control lines.
pub fn run_headless_with_stdin(cfg: &AppConfig, frames: u64) -> HeadlessSummary {
    let (tx, rx) = control_queue(cfg.queue_depth);
    spawn_control_source(LineFeedSource::new(BufReader::new(io::stdin())), tx);
    run_headless(cfg, frames, Some(&rx))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
