//! # social_dials
//!
//! The wall's input surface.  Three social dials (equity, climate and
//! surveillance) plus a particle-count target arrive as [`ControlSample`]s
//! from sliders, 0–255 hardware dials, a temperature sensor or a line feed.
//! Device threads push them into a bounded [`control_queue`]; once per frame
//! the [`ParameterMapper`] drains the queue and derives the frame's
//! [`chladni_field::SimulationConfig`].
//!
//! | control | range | drives |
//! |---|---|---|
//! | equity | 1–10 | x wave number 1–40, ageing speed, stroke ratio |
//! | climate | 1–10 | walk gain 0.05–0.001, target hue 0–260 |
//! | surveillance | 1–10 | y wave number 1–40, hue overshoot, trail mode |
//! | count | 0–capacity | particles advanced per frame |
//!
//! ```rust
//! use social_dials::{control_queue, ControlSample, ParameterMapper, WaveDirection};
//!
//! let (tx, rx) = control_queue(16);
//! tx.offer("dial equity 255".parse::<ControlSample>().unwrap());
//!
//! let mut mapper = ParameterMapper::new(1_000, WaveDirection::Ascending);
//! mapper.drain(&rx);
//! assert_eq!(mapper.config().wave_m, 40.0);
//! ```

pub mod mapper;
pub mod queue;
pub mod sample;

pub use mapper::{ControlValues, ParameterMapper, WaveDirection, DEFAULT_WAVE_N_DIRECTION};
pub use queue::{control_queue, ControlReceiver, ControlSender, DEFAULT_QUEUE_DEPTH};
pub use sample::{ControlSample, Dial, SampleParseError};
