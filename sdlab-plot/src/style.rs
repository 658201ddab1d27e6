//! Shared plot styling.

use plotters::style::RGBColor;

/// The series palette, one entry per line a chart can carry.
pub const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(0xff, 0x7f, 0x00),
    RGBColor(0x37, 0x7e, 0xb8),
    RGBColor(0x98, 0x4e, 0xa3),
    RGBColor(0x00, 0x00, 0x00),
    RGBColor(0x4d, 0xaf, 0x4a),
    RGBColor(0xe4, 0x1a, 0x1c),
];

/// Palette color for the i-th series, cycling past the end.
pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}
