//! Run colors.

use crate::error::{PlotError, PlotResult};
use osc_core::PALETTE_SIZE;
use serde::{Deserialize, Serialize};

/// Colors assigned to archived runs, by `Run::color_index`.
pub const PALETTE_HEX: [&str; PALETTE_SIZE] =
    ["#3498db", "#e74c3c", "#2ecc71", "#9b59b6", "#f39c12"];

/// Alpha applied to archived runs drawn behind the live trace.
pub const OVERLAY_ALPHA: u8 = 180;

/// Live trace color.
pub const LIVE_TRACE: Rgba = Rgba::rgb(30, 144, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> PlotResult<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| PlotError::InvalidColor(hex.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PlotError::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Opaque palette color for a run's color index.
pub fn palette_color(color_index: usize) -> Rgba {
    const PALETTE: [Rgba; PALETTE_SIZE] = [
        Rgba::rgb(0x34, 0x98, 0xdb),
        Rgba::rgb(0xe7, 0x4c, 0x3c),
        Rgba::rgb(0x2e, 0xcc, 0x71),
        Rgba::rgb(0x9b, 0x59, 0xb6),
        Rgba::rgb(0xf3, 0x9c, 0x12),
    ];
    PALETTE[color_index % PALETTE_SIZE]
}
