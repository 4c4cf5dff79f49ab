//! Packed ARGB helpers and the HSB conversion used by the wall.

use chladni_field::Hsba;

/// Convert HSB (hue 0–360, saturation/brightness 0–100) → packed ARGB
/// (0xAARRGGBB, A=0xFF).  Out-of-range components are clamped.
pub fn hsb_to_argb(color: Hsba) -> u32 {
    let h = color.hue.rem_euclid(360.0);
    let s = (color.saturation / 100.0).clamp(0.0, 1.0);
    let v = (color.brightness / 100.0).clamp(0.0, 1.0);

    let hi = (h / 60.0) as u32;
    let f  = h / 60.0 - hi as f32;
    let p  = v * (1.0 - s);
    let q  = v * (1.0 - s * f);
    let t  = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    rgb(
        (r * 255.0).round() as u32,
        (g * 255.0).round() as u32,
        (b * 255.0).round() as u32,
    )
}

#[inline]
pub fn rgb(r: u32, g: u32, b: u32) -> u32 {
    0xFF000000 | ((r & 0xFF) << 16) | ((g & 0xFF) << 8) | (b & 0xFF)
}

/// Opaque gray level.
#[inline]
pub fn gray(level: u8) -> u32 {
    let l = level as u32;
    rgb(l, l, l)
}

#[inline]
pub fn channels(c: u32) -> (u32, u32, u32) {
    ((c >> 16) & 0xFF, (c >> 8) & 0xFF, c & 0xFF)
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t).round() as u32;
    let (ar, ag, ab) = channels(a);
    let (br, bg, bb) = channels(b);
    rgb(lerp(ar, br), lerp(ag, bg), lerp(ab, bb))
}
