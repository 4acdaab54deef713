// Series colour palette

use serde::Serialize;
use std::fmt;

/// An sRGB colour stored as a `#rrggbb` hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub fn hex(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Category palette shared by every chart kind
pub const PALETTE: [Color; 8] = [
    Color("#3b82f6"),
    Color("#10b981"),
    Color("#f59e0b"),
    Color("#ef4444"),
    Color("#8b5cf6"),
    Color("#ec4899"),
    Color("#06b6d4"),
    Color("#84cc16"),
];

/// Colour for the series or slice at `index`.
///
/// Cycles through [`PALETTE`], so index `PALETTE.len()` gets the first colour again.
/// Keyed purely by position: reordering series reorders colours.
pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), PALETTE[0]);
        assert_eq!(palette_color(PALETTE.len()), PALETTE[0]);
        assert_eq!(palette_color(PALETTE.len() * 3 + 2), PALETTE[2]);
    }

    #[test]
    fn test_palette_distinct_within_cycle() {
        for i in 0..PALETTE.len() {
            for j in (i + 1)..PALETTE.len() {
                assert_ne!(palette_color(i), palette_color(j));
            }
        }
    }

    #[test]
    fn test_hex_format() {
        for color in PALETTE {
            assert_eq!(color.hex().len(), 7);
            assert!(color.to_string().starts_with('#'));
        }
    }
}
