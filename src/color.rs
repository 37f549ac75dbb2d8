// Color specifications -> RGBA pixel values.
// Accepts "#RGB", "#RRGGBB", "#RRGGBBAA" and a handful of CSS color names.

use crate::error::{Error, Result};
use image::Rgba;

pub type Color = Rgba<u8>;

pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);

/// Named colors understood by `parse` (CSS names, lowercase).
const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("olive", [128, 128, 0]),
    ("maroon", [128, 0, 0]),
    ("skyblue", [135, 206, 235]),
    ("gold", [255, 215, 0]),
];

/// Opaque color from its channels.
pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Rgba([r, g, b, 255])
}

/// Resolve a color spec string. Unknown names and malformed hex are InvalidArgument.
pub fn parse(spec: &str) -> Result<Color> {
    let s = spec.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| bad_spec(spec));
    }
    let lower = s.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, [r, g, b])| rgb(*r, *g, *b))
        .ok_or_else(|| bad_spec(spec))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    // "#abc" doubles each nibble: a -> aa
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    match hex.len() {
        3 => Some(rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => None,
    }
}

fn bad_spec(spec: &str) -> Error {
    Error::InvalidArgument(format!("unrecognized color {spec:?}"))
}

/// Pack to 0x00RRGGBB, the layout minifb expects.
#[inline]
pub fn pack_rgb(c: Color) -> u32 {
    let [r, g, b, _] = c.0;
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
