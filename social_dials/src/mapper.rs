//! Turns the current dial positions into the frame's [`SimulationConfig`].

use chladni_field::{remap, SimulationConfig, DIAL_MAX, DIAL_MIN, MAX_HUE};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::queue::ControlReceiver;
use crate::sample::{ControlSample, Dial};

/// Highest local wave number.
pub const MAX_WAVE_NUMBER: f32 = 40.0;

/// Walk gain at the calmest (climate 10) and wildest (climate 1) settings.
pub const WALK_GAIN_CALM: f32 = 0.001;
pub const WALK_GAIN_WILD: f32 = 0.05;

/// Which way the surveillance dial runs across the y wave number.
///
/// The installation walls disagree on this; the ascending layout is the
/// default and the other one stays selectable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveDirection {
    /// surveillance 1 → 1, surveillance 10 → 40
    Ascending,
    /// surveillance 1 → 40, surveillance 10 → 1
    Descending,
}

pub const DEFAULT_WAVE_N_DIRECTION: WaveDirection = WaveDirection::Ascending;

impl Default for WaveDirection {
    fn default() -> Self { DEFAULT_WAVE_N_DIRECTION }
}

// ════════════════════════════════════════════════════════════════════════════
// ControlValues
// ════════════════════════════════════════════════════════════════════════════

/// Current position of every control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlValues {
    pub equity:         f32,
    pub climate:        f32,
    pub surveillance:   f32,
    pub particle_count: usize,
}

impl ControlValues {
    pub fn centred(particle_count: usize) -> Self {
        ControlValues { equity: 5.0, climate: 5.0, surveillance: 5.0, particle_count }
    }

    pub fn get(&self, dial: Dial) -> f32 {
        match dial {
            Dial::Equity       => self.equity,
            Dial::Climate      => self.climate,
            Dial::Surveillance => self.surveillance,
        }
    }

    /// Set a dial, clamping onto the 1–10 scale.
    pub fn set(&mut self, dial: Dial, level: f32) {
        let level = level.clamp(DIAL_MIN, DIAL_MAX);
        match dial {
            Dial::Equity       => self.equity = level,
            Dial::Climate      => self.climate = level,
            Dial::Surveillance => self.surveillance = level,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ParameterMapper
// ════════════════════════════════════════════════════════════════════════════

/// Holds the latest control values and derives the per-frame tunables.
#[derive(Clone, Debug)]
pub struct ParameterMapper {
    values:    ControlValues,
    capacity:  usize,
    wave_n:    WaveDirection,
    palm_x:    Option<f32>,
}

impl ParameterMapper {
    /// Mapper for a pool of `capacity` particles, dials centred, all
    /// particles active.
    pub fn new(capacity: usize, wave_n: WaveDirection) -> Self {
        ParameterMapper {
            values: ControlValues::centred(capacity),
            capacity,
            wave_n,
            palm_x: None,
        }
    }

    pub fn with_values(mut self, values: ControlValues) -> Self {
        for dial in Dial::ALL {
            self.values.set(dial, values.get(dial));
        }
        self.values.particle_count = values.particle_count.min(self.capacity);
        self
    }

    pub fn values(&self)   -> &ControlValues  { &self.values }
    pub fn capacity(&self) -> usize           { self.capacity }
    /// Last palm position reported by the hand tracker.
    pub fn palm_x(&self)   -> Option<f32>     { self.palm_x }

    /// Fold one sample into the current values.  Returns `false` when the
    /// sample carried nothing usable.
    pub fn apply(&mut self, sample: ControlSample) -> bool {
        if let Some((dial, level)) = sample.dial_level() {
            self.values.set(dial, level);
            return true;
        }
        match sample {
            ControlSample::ParticleCount(n) => {
                self.values.particle_count = n.min(self.capacity);
                true
            }
            ControlSample::Palm { x } if x.is_finite() => {
                self.palm_x = Some(x.clamp(0.0, 1.0));
                true
            }
            _ => {
                trace!(?sample, "ignoring unusable control sample");
                false
            }
        }
    }

    /// Apply every queued sample in arrival order; the last value per control
    /// wins.  Returns how many samples were applied.
    pub fn drain(&mut self, rx: &ControlReceiver) -> usize {
        let mut applied = 0;
        while let Some(sample) = rx.try_next() {
            if self.apply(sample) { applied += 1; }
        }
        applied
    }

    /// Derive this frame's tunables from the current values.
    pub fn config(&self) -> SimulationConfig {
        let v = &self.values;
        let (n_lo, n_hi) = match self.wave_n {
            WaveDirection::Ascending  => (1.0, MAX_WAVE_NUMBER),
            WaveDirection::Descending => (MAX_WAVE_NUMBER, 1.0),
        };
        SimulationConfig {
            equity:       v.equity,
            climate:      v.climate,
            surveillance: v.surveillance,
            wave_m:       remap(v.equity, DIAL_MIN, DIAL_MAX, 1.0, MAX_WAVE_NUMBER),
            wave_n:       remap(v.surveillance, DIAL_MIN, DIAL_MAX, n_lo, n_hi),
            walk_gain:    remap(v.climate, DIAL_MIN, DIAL_MAX, WALK_GAIN_WILD, WALK_GAIN_CALM),
            target_hue:   remap(v.climate, DIAL_MIN, DIAL_MAX, 0.0, MAX_HUE),
            active_count: v.particle_count.min(self.capacity),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
