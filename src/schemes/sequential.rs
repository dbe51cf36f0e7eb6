//! Sequential schemes (single-hue or perceptual progression).
//!
//! These schemes are suitable for data that progresses from low to high.

use super::scheme::{AnchorScheme, PresetScheme};

/// Viridis - perceptually uniform, colorblind-friendly
pub fn viridis() -> PresetScheme {
    PresetScheme::new("viridis", colorgrad::viridis)
}

pub fn plasma() -> PresetScheme {
    PresetScheme::new("plasma", colorgrad::plasma)
}

pub fn magma() -> PresetScheme {
    PresetScheme::new("magma", colorgrad::magma)
}

pub fn inferno() -> PresetScheme {
    PresetScheme::new("inferno", colorgrad::inferno)
}

/// Cividis - colorblind-friendly alternative to viridis
pub fn cividis() -> PresetScheme {
    PresetScheme::new("cividis", colorgrad::cividis)
}

pub fn turbo() -> PresetScheme {
    PresetScheme::new("turbo", colorgrad::turbo)
}

static MAKO: [[u8; 3]; 9] = [
    [11, 4, 5], // Near black
    [43, 28, 53],
    [62, 53, 107],
    [59, 86, 142],
    [53, 121, 162],
    [52, 155, 170],
    [73, 189, 173],
    [133, 218, 176],
    [222, 245, 229], // Pale mint
];

static ROCKET: [[u8; 3]; 9] = [
    [3, 5, 26], // Near black
    [48, 21, 60],
    [98, 26, 81],
    [151, 21, 91],
    [203, 27, 79],
    [235, 80, 63],
    [244, 135, 92],
    [246, 185, 143],
    [250, 235, 221], // Cream
];

static CREST: [[u8; 3]; 8] = [
    [165, 205, 144], // Light green
    [121, 183, 147],
    [85, 160, 146],
    [58, 137, 144],
    [43, 113, 142],
    [38, 88, 136],
    [41, 67, 126],
    [44, 49, 114], // Dark blue
];

/// Mako - dark blue-green to pale mint
pub fn mako() -> AnchorScheme {
    AnchorScheme::new("mako", &MAKO)
}

/// Rocket - near black through crimson to cream
pub fn rocket() -> AnchorScheme {
    AnchorScheme::new("rocket", &ROCKET)
}

/// Crest - light green to dark blue
pub fn crest() -> AnchorScheme {
    AnchorScheme::new("crest", &CREST)
}
