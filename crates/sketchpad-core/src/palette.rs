//! Quick-pick color swatches.

use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A toolbar color swatch, bound to digit keys 1–6 in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Swatch {
    Black,
    White,
    Yellow,
    Red,
    Blue,
    Green,
}

const SWATCHES: [Swatch; 6] = [
    Swatch::Black,
    Swatch::White,
    Swatch::Yellow,
    Swatch::Red,
    Swatch::Blue,
    Swatch::Green,
];

impl Swatch {
    /// All swatches in display order.
    pub const fn all() -> &'static [Swatch] {
        &SWATCHES
    }

    pub const fn color(&self) -> SerializableColor {
        match self {
            Swatch::Black => SerializableColor::rgb(0x00, 0x00, 0x00),
            Swatch::White => SerializableColor::rgb(0xff, 0xff, 0xff),
            Swatch::Yellow => SerializableColor::rgb(0xf5, 0x9e, 0x0b),
            Swatch::Red => SerializableColor::rgb(0xef, 0x44, 0x44),
            Swatch::Blue => SerializableColor::rgb(0x3b, 0x82, 0xf6),
            Swatch::Green => SerializableColor::rgb(0x22, 0xc5, 0x5e),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Swatch::Black => "Black",
            Swatch::White => "White",
            Swatch::Yellow => "Yellow",
            Swatch::Red => "Red",
            Swatch::Blue => "Blue",
            Swatch::Green => "Green",
        }
    }

    /// Swatch for a digit key ('1' is the first swatch).
    pub fn from_digit(digit: char) -> Option<Swatch> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        SWATCHES.get(index as usize).copied()
    }

    /// The digit key bound to this swatch.
    pub fn digit(&self) -> char {
        let index = SWATCHES.iter().position(|s| s == self).unwrap_or_default();
        char::from(b'1' + index as u8)
    }

    /// Look up a swatch by name, ignoring case.
    pub fn by_name(name: &str) -> Option<Swatch> {
        SWATCHES
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.color())
    }
}
