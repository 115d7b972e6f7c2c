//! Particle colors.
//! Named palette; hosts map each entry to a fill style.

use serde::{Deserialize, Serialize};

/// Render-style token fixed on a particle at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Orange,
    Yellow,
    LimeGreen,
    Green,
    Cyan,
    SkyBlue,
    Blue,
    Indigo,
    Magenta,
    Pink,
    White,
}

impl Color {
    pub const ALL: [Color; 12] = [
        Self::Red, Self::Orange, Self::Yellow, Self::LimeGreen,
        Self::Green, Self::Cyan, Self::SkyBlue, Self::Blue,
        Self::Indigo, Self::Magenta, Self::Pink, Self::White,
    ];

    /// 8-bit RGB triple.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Red =>       [0xe6, 0x39, 0x46],
            Self::Orange =>    [0xf4, 0xa2, 0x61],
            Self::Yellow =>    [0xe9, 0xc4, 0x6a],
            Self::LimeGreen => [0xa7, 0xc9, 0x57],
            Self::Green =>     [0x2a, 0x9d, 0x8f],
            Self::Cyan =>      [0x48, 0xca, 0xe4],
            Self::SkyBlue =>   [0x8e, 0xca, 0xe6],
            Self::Blue =>      [0x21, 0x9e, 0xbc],
            Self::Indigo =>    [0x4b, 0x3f, 0x72],
            Self::Magenta =>   [0xc7, 0x3e, 0x9b],
            Self::Pink =>      [0xff, 0x8f, 0xab],
            Self::White =>     [0xff, 0xff, 0xff],
        }
    }

    /// CSS hex string, e.g. `#e63946`.
    pub fn css(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Palette index, used as the color slot in flat render buffers.
    pub fn index(self) -> u8 {
        self as u8
    }
}
