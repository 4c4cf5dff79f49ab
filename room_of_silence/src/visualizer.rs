//! Software-rendered wall window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                                              │
//! │        particle field (Framebuffer)          │
//! │                                              │
//! │                                              │
//! ├──────────────────────────────────────────────┤
//! │ HUD: dials, count, mode         palm marker ▮│
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The particle framebuffer keeps its fading history between frames; the HUD
//! is composited onto a separate output buffer so it never leaves trails.

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use wall_canvas::Framebuffer;

use crate::controls::{SimInput, SimKey};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const HUD_H:      usize = 22;
const HUD_BG:         u32   = 0xFF0F0F14;
const HUD_TEXT:       u32   = 0xFFCCCCCC;
const HUD_LEGEND:     u32   = 0xFF777777;
const PALM_COLOR:     u32   = 0xFFFFD700;
const GLYPH_ADVANCE:  usize = 4;

const KEY_LEGEND: &str =
    "Q/A=equity  W/S=climate  E/D=surveil  R/F=count  H=hud  Esc=quit";

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:   Window,
    field:    Framebuffer,
    out:      Vec<u32>,
    width:    usize,
    height:   usize,
    sim_tx:   Sender<SimInput>,
    show_hud: bool,
}

impl Visualizer {
    pub fn new(
        width:  usize,
        height: usize,
        fps:    u32,
        sim_tx: Sender<SimInput>,
    ) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "Room of Silence",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(frame_interval(fps)));

        Ok(Visualizer {
            window,
            field: Framebuffer::new(width, height),
            out: vec![0; width * height],
            width,
            height,
            sim_tx,
            show_hud: true,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn set_hud(&mut self, on: bool) { self.show_hud = on; }

    /// The persistent canvas the particles draw into.
    pub fn field_mut(&mut self) -> &mut Framebuffer { &mut self.field }

    /// Poll keyboard inputs and translate to SimInput events.
    /// Returns false when the wall should close.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        if self.window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Quit));
            return false;
        }
        if self.window.is_key_pressed(Key::H, KeyRepeat::No) {
            self.show_hud = !self.show_hud;
        }

        // Slider keys repeat while held
        const SLIDERS: [(Key, SimKey); 8] = [
            (Key::Q, SimKey::EquityUp),
            (Key::A, SimKey::EquityDown),
            (Key::W, SimKey::ClimateUp),
            (Key::S, SimKey::ClimateDown),
            (Key::E, SimKey::SurveillanceUp),
            (Key::D, SimKey::SurveillanceDown),
            (Key::R, SimKey::CountUp),
            (Key::F, SimKey::CountDown),
        ];
        for (key, sim) in SLIDERS {
            if self.window.is_key_pressed(key, KeyRepeat::Yes) {
                let _ = self.sim_tx.send(SimInput::KeyDown(sim));
            }
        }

        true
    }

    /// Composite the HUD over the field and push the frame to the window.
    pub fn present(&mut self, status: &str, palm_x: Option<f32>) -> Result<(), minifb::Error> {
        self.out.copy_from_slice(self.field.buffer());
        if self.show_hud {
            let mut hud = Overlay::new(&mut self.out, self.width, self.height);
            hud.draw_hud(status, palm_x);
        }
        self.window.update_with_buffer(&self.out, self.width, self.height)
    }
}

/// Update interval for a target frame rate.
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
}

// ════════════════════════════════════════════════════════════════════════════
// Overlay: HUD primitives on a borrowed ARGB buffer
// ════════════════════════════════════════════════════════════════════════════

pub struct Overlay<'a> {
    buf:    &'a mut [u32],
    width:  usize,
    height: usize,
}

impl<'a> Overlay<'a> {
    pub fn new(buf: &'a mut [u32], width: usize, height: usize) -> Self {
        Overlay { buf, width, height }
    }

    /// Status line, key legend and palm marker in a bar along the bottom.
    pub fn draw_hud(&mut self, status: &str, palm_x: Option<f32>) {
        let top = self.height.saturating_sub(HUD_H);
        self.fill_rect(0, top, self.width, HUD_H, HUD_BG);
        self.draw_label(status, 6, top + 3, HUD_TEXT);
        self.draw_label(KEY_LEGEND, 6, top + 13, HUD_LEGEND);
        if let Some(x) = palm_x {
            let px = (x.clamp(0.0, 1.0) * (self.width.saturating_sub(3)) as f32) as usize;
            self.fill_rect(px, top, 3, HUD_H, PALM_COLOR);
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.buf[y * self.width + x] = color;
        }
    }

    /// Minimal bitmap font: 3×5 characters, one column gap.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            if cx + GLYPH_ADVANCE > self.width { break; }
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += GLYPH_ADVANCE;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

/// Rows top to bottom, bit 2 is the left column.  Covers what the HUD
/// prints; letters are looked up case-insensitively.
const FONT: &[(char, [u8; 5])] = &[
    ('0', [0b111, 0b101, 0b101, 0b101, 0b111]),
    ('1', [0b010, 0b110, 0b010, 0b010, 0b111]),
    ('2', [0b111, 0b001, 0b111, 0b100, 0b111]),
    ('3', [0b111, 0b001, 0b111, 0b001, 0b111]),
    ('4', [0b101, 0b101, 0b111, 0b001, 0b001]),
    ('5', [0b111, 0b100, 0b111, 0b001, 0b111]),
    ('6', [0b111, 0b100, 0b111, 0b101, 0b111]),
    ('7', [0b111, 0b001, 0b001, 0b001, 0b001]),
    ('8', [0b111, 0b101, 0b111, 0b101, 0b111]),
    ('9', [0b111, 0b101, 0b111, 0b001, 0b111]),
    ('a', [0b010, 0b101, 0b111, 0b101, 0b101]),
    ('c', [0b011, 0b100, 0b100, 0b100, 0b011]),
    ('d', [0b110, 0b101, 0b101, 0b101, 0b110]),
    ('e', [0b111, 0b100, 0b110, 0b100, 0b111]),
    ('f', [0b111, 0b100, 0b110, 0b100, 0b100]),
    ('h', [0b101, 0b101, 0b111, 0b101, 0b101]),
    ('i', [0b111, 0b010, 0b010, 0b010, 0b111]),
    ('l', [0b100, 0b100, 0b100, 0b100, 0b111]),
    ('m', [0b101, 0b111, 0b111, 0b101, 0b101]),
    ('n', [0b110, 0b101, 0b101, 0b101, 0b101]),
    ('o', [0b010, 0b101, 0b101, 0b101, 0b010]),
    ('p', [0b110, 0b101, 0b110, 0b100, 0b100]),
    ('q', [0b010, 0b101, 0b101, 0b110, 0b011]),
    ('r', [0b110, 0b101, 0b110, 0b101, 0b101]),
    ('s', [0b011, 0b100, 0b010, 0b001, 0b110]),
    ('t', [0b111, 0b010, 0b010, 0b010, 0b010]),
    ('u', [0b101, 0b101, 0b101, 0b101, 0b111]),
    ('v', [0b101, 0b101, 0b101, 0b101, 0b010]),
    ('w', [0b101, 0b101, 0b111, 0b111, 0b101]),
    ('y', [0b101, 0b101, 0b010, 0b010, 0b010]),
    ('.', [0b000, 0b000, 0b000, 0b000, 0b010]),
    ('/', [0b001, 0b001, 0b010, 0b100, 0b100]),
    ('=', [0b000, 0b111, 0b000, 0b111, 0b000]),
    (' ', [0b000, 0b000, 0b000, 0b000, 0b000]),
];

/// Drawn for anything missing from [`FONT`].
const UNKNOWN_GLYPH: [u8; 5] = [0b000, 0b000, 0b010, 0b000, 0b000];

fn char_glyph(c: char) -> [u8; 5] {
    let c = c.to_ascii_lowercase();
    FONT.iter()
        .find(|(key, _)| *key == c)
        .map_or(UNKNOWN_GLYPH, |(_, glyph)| *glyph)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
