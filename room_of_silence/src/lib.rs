//! # room_of_silence
//!
//! The installation host: opens the wall window, listens to the control
//! devices and runs the particle field once per frame.
//!
//! ## Control → effect mapping
//!
//! | Control | Range | Effect |
//! |---|---|---|
//! | Equity | 1–10 | x wave number, how fast particles age, stroke thickness |
//! | Climate | 1–10 | walk restlessness (wild at 1, calm at 10), target hue |
//! | Surveillance | 1–10 | y wave number, hue overshoot, trails above 8.5 |
//! | Count | 0–capacity | number of particles moving each frame |
//!
//! ## Frame
//!
//! Device threads push [`social_dials::ControlSample`]s into one bounded
//! queue.  Each frame the loop drains the queue into the mapper, lays a
//! translucent wipe over the framebuffer, steps the pool against the fresh
//! [`chladni_field::SimulationConfig`] and presents the buffer.
//!
//! ### Keyboard slider emulation
//!
//! | Key | Control |
//! |---|---|
//! | `Q` / `A` | Equity up / down |
//! | `W` / `S` | Climate up / down |
//! | `E` / `D` | Surveillance up / down |
//! | `R` / `F` | Particle count up / down (500 per press) |
//! | `H` | Toggle HUD |
//! | `Escape` | Quit |
//!
//! With `--stdin` the same controls can be fed as text lines
//! (`equity 7.5`, `dial climate 200`, `temp 24.5`, `count 4000`, `palm 0.42`).

pub mod app;
pub mod controls;
pub mod visualizer;
