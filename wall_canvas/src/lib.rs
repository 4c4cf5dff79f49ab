//! # wall_canvas
//!
//! Software rasterizer for the Room of Silence wall.
//!
//! [`Framebuffer`] implements [`chladni_field::Canvas`], so the particle pool
//! draws straight into a packed ARGB buffer that a `minifb` window (or a
//! headless test) can present.  Each frame starts with a translucent
//! [`wipe`](Framebuffer::wipe) so old marks fade out over a few seconds.
//!
//! ```
//! use chladni_field::{Canvas, Hsba};
//! use wall_canvas::Framebuffer;
//!
//! let mut fb = Framebuffer::new(16, 16);
//! fb.stroke(Hsba::opaque(120.0, 100.0, 100.0));
//! fb.stroke_weight(4.0);
//! fb.point(8.0, 8.0);
//! assert_eq!(fb.pixel(8, 8), Some(0xFF00FF00));
//! ```

pub mod color;
pub mod framebuffer;

pub use color::{blend, gray, hsb_to_argb, rgb};
pub use framebuffer::{Framebuffer, WIPE_ALPHA, WIPE_GRAY};
