//! RGB/HSL conversion and depth-based color softening
//!
//! Child tags never carry their own color: it is derived from the root
//! ancestor's color by lightening and desaturating it once per level of depth.

use crate::model::{TaxonomyError, TaxonomyResult};

/// Lightness added per level of depth
pub const LIGHTNESS_STEP: f64 = 0.15;
/// Saturation removed per level of depth
pub const SATURATION_STEP: f64 = 0.10;
/// Upper bound for derived lightness
pub const MAX_LIGHTNESS: f64 = 0.95;
/// Lower bound for derived saturation
pub const MIN_SATURATION: f64 = 0.30;

/// Parse a 6-digit hex color, with or without a leading `#`
///
/// # Returns
/// * `(r, g, b)` - Red, Green, Blue components (0-255)
pub fn parse_hex(value: &str) -> TaxonomyResult<(u8, u8, u8)> {
    let invalid = || TaxonomyError::InvalidColor {
        value: value.to_string(),
    };

    let digits = value.trim().strip_prefix('#').unwrap_or(value.trim());
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Render RGB components as `#RRGGBB`
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Canonical stored form of a color: `#RRGGBB`, uppercase
pub fn normalize_hex(value: &str) -> TaxonomyResult<String> {
    let (r, g, b) = parse_hex(value)?;
    Ok(rgb_to_hex(r, g, b))
}

/// Convert RGB color to HSL color space
///
/// # Returns
/// * `(h, s, l)` - Hue in [0, 1) for a full turn, Saturation (0-1), Lightness (0-1)
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        // Achromatic
        return (0.0, 0.0, l);
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let h = h / 6.0;
    let h = if h >= 1.0 { h - 1.0 } else { h };

    (h, s, l)
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert HSL color to RGB color space
///
/// Channels are rounded half away from zero and clamped to 0-255.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    if s == 0.0 {
        let v = to_byte(l);
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

/// HSL components of a hex color
pub fn to_hsl(hex: &str) -> TaxonomyResult<(f64, f64, f64)> {
    let (r, g, b) = parse_hex(hex)?;
    Ok(rgb_to_hsl(r, g, b))
}

/// Hex color of HSL components
pub fn to_hex(h: f64, s: f64, l: f64) -> String {
    let (r, g, b) = hsl_to_rgb(h, s, l);
    rgb_to_hex(r, g, b)
}

/// Derive the color of a tag at `depth` below a root colored `root_hex`
///
/// Depth 0 returns the root color unchanged (normalized).
pub fn soften(root_hex: &str, depth: usize) -> TaxonomyResult<String> {
    if depth == 0 {
        return normalize_hex(root_hex);
    }

    let (h, s, l) = to_hsl(root_hex)?;
    let depth = depth as f64;
    let l = (l + LIGHTNESS_STEP * depth).min(MAX_LIGHTNESS);
    let s = (s - SATURATION_STEP * depth).max(MIN_SATURATION);

    Ok(to_hex(h, s, l))
}
