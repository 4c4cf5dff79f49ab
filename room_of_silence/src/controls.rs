//! Control sources: keyboard slider emulation and the stdin line feed.
//!
//! Every source runs on its own thread and pushes [`ControlSample`]s into the
//! shared bounded queue.  The frame loop does not care which device a sample
//! came from.

use std::io::BufRead;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use chladni_field::{DIAL_MAX, DIAL_MIN};
use social_dials::{ControlSample, ControlSender, ControlValues, Dial};
use tracing::{debug, info, warn};

/// Dial movement per key press.
pub const DIAL_STEP: f32 = 0.5;
/// Particle-count movement per key press.
pub const COUNT_STEP: usize = 500;

// ════════════════════════════════════════════════════════════════════════════
// ControlSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`ControlSample`]s into the control queue.
pub trait ControlSource: Send + 'static {
    fn run(self: Box<Self>, tx: ControlSender);
}

/// Spawn a control source on its own thread, feeding `tx`.
pub fn spawn_control_source<S: ControlSource>(source: S, tx: ControlSender) -> JoinHandle<()> {
    thread::spawn(move || Box::new(source).run(tx))
}

// ════════════════════════════════════════════════════════════════════════════
// SimControlSource: keyboard sliders
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the wall window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
}

/// Simulated slider keys (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    EquityUp,           // Q
    EquityDown,         // A
    ClimateUp,          // W
    ClimateDown,        // S
    SurveillanceUp,     // E
    SurveillanceDown,   // D
    CountUp,            // R
    CountDown,          // F
    Quit,               // Escape
}

/// Emulates the three sliders and the count knob from window key presses.
///
/// The source keeps its own slider positions, starting from the values the
/// wall opened with, and sends absolute [`ControlSample::Level`] readings
/// the way a physical slider would.
pub struct SimControlSource {
    rx:       Receiver<SimInput>,
    values:   ControlValues,
    capacity: usize,
}

impl SimControlSource {
    pub fn new(rx: Receiver<SimInput>, start: ControlValues, capacity: usize) -> Self {
        SimControlSource { rx, values: start, capacity }
    }

    /// Move the emulated slider for `key` and report its new reading.
    /// `None` for [`SimKey::Quit`].
    pub fn press(&mut self, key: SimKey) -> Option<ControlSample> {
        let nudge = |dial: Dial, delta: f32, values: &mut ControlValues| {
            let level = (values.get(dial) + delta).clamp(DIAL_MIN, DIAL_MAX);
            values.set(dial, level);
            ControlSample::Level { dial, value: level }
        };
        let v = &mut self.values;
        let sample = match key {
            SimKey::EquityUp         => nudge(Dial::Equity,        DIAL_STEP, v),
            SimKey::EquityDown       => nudge(Dial::Equity,       -DIAL_STEP, v),
            SimKey::ClimateUp        => nudge(Dial::Climate,       DIAL_STEP, v),
            SimKey::ClimateDown      => nudge(Dial::Climate,      -DIAL_STEP, v),
            SimKey::SurveillanceUp   => nudge(Dial::Surveillance,  DIAL_STEP, v),
            SimKey::SurveillanceDown => nudge(Dial::Surveillance, -DIAL_STEP, v),
            SimKey::CountUp => {
                v.particle_count = (v.particle_count + COUNT_STEP).min(self.capacity);
                ControlSample::ParticleCount(v.particle_count)
            }
            SimKey::CountDown => {
                v.particle_count = v.particle_count.saturating_sub(COUNT_STEP);
                ControlSample::ParticleCount(v.particle_count)
            }
            SimKey::Quit => return None,
        };
        Some(sample)
    }

    pub fn values(&self) -> &ControlValues { &self.values }
}

impl ControlSource for SimControlSource {
    fn run(mut self: Box<Self>, tx: ControlSender) {
        while let Ok(SimInput::KeyDown(key)) = self.rx.recv() {
            match self.press(key) {
                Some(sample) => { tx.offer(sample); }
                None         => return,
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LineFeedSource: text control feed
// ════════════════════════════════════════════════════════════════════════════

/// Reads one control sample per line (`equity 7.5`, `dial climate 200`, …)
/// from any buffered reader, typically stdin.
///
/// Blank lines and `#` comments are skipped; malformed lines are dropped.
pub struct LineFeedSource<R> {
    reader: R,
}

impl<R: BufRead + Send + 'static> LineFeedSource<R> {
    pub fn new(reader: R) -> Self { LineFeedSource { reader } }
}

impl<R: BufRead + Send + 'static> ControlSource for LineFeedSource<R> {
    fn run(self: Box<Self>, tx: ControlSender) {
        let mut accepted = 0usize;
        for (lineno, line) in self.reader.lines().enumerate() {
            let line = match line {
                Ok(l)  => l,
                Err(e) => {
                    warn!(error = %e, "control feed read failed");
                    break;
                }
            };
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') { continue; }
            match text.parse::<ControlSample>() {
                Ok(sample) => {
                    if tx.offer(sample) { accepted += 1; }
                }
                Err(e) => debug!(line = lineno + 1, error = %e, "dropping control line"),
            }
        }
        info!(accepted, "control feed closed");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
