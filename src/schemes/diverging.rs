//! Diverging schemes (two-hue progression with center).
//!
//! These schemes are suitable for data that diverges from a central value.

use super::scheme::{AnchorScheme, PresetScheme};

/// Blue to white to red - good for temperature data
static COOLWARM: [[u8; 3]; 32] = [
    [59, 76, 192], // Dark blue
    [68, 90, 204],
    [77, 104, 215],
    [87, 117, 225],
    [98, 130, 234],
    [108, 142, 241],
    [119, 154, 247],
    [130, 165, 251],
    [141, 176, 254],
    [152, 185, 255],
    [163, 194, 255],
    [174, 201, 253],
    [184, 208, 249],
    [194, 213, 244],
    [204, 217, 238],
    [213, 219, 230],
    [221, 221, 221], // Gray in the middle
    [229, 216, 209],
    [236, 211, 197],
    [241, 204, 185],
    [245, 196, 173],
    [247, 187, 160],
    [247, 177, 148],
    [247, 166, 135],
    [244, 154, 123],
    [241, 141, 111],
    [236, 127, 99],
    [229, 112, 88],
    [222, 96, 77],
    [213, 80, 66],
    [203, 62, 56],
    [192, 40, 47], // Dark red
];

static SEISMIC: [[u8; 3]; 15] = [
    [0, 0, 127], // Dark blue
    [0, 0, 191],
    [0, 63, 255],
    [0, 127, 255],
    [0, 191, 255],
    [127, 223, 255],
    [191, 239, 255],
    [255, 255, 255], // White in the middle
    [255, 239, 191],
    [255, 223, 127],
    [255, 191, 0],
    [255, 127, 0],
    [255, 63, 0],
    [191, 0, 0],
    [127, 0, 0], // Dark red
];

static VLAG: [[u8; 3]; 7] = [
    [35, 105, 189], // Blue
    [117, 146, 206],
    [187, 196, 224],
    [243, 241, 241], // Off-white
    [222, 176, 168],
    [198, 110, 101],
    [169, 55, 59], // Red
];

static ICEFIRE: [[u8; 3]; 9] = [
    [189, 230, 219], // Ice
    [100, 175, 206],
    [61, 100, 186],
    [48, 44, 90],
    [31, 30, 31], // Near black in the middle
    [95, 30, 48],
    [170, 34, 52],
    [233, 96, 46],
    [255, 205, 140], // Fire
];

/// Coolwarm - blue to red through light gray
pub fn coolwarm() -> AnchorScheme {
    AnchorScheme::new("coolwarm", &COOLWARM)
}

/// Seismic - blue-white-red for anomalies
pub fn seismic() -> AnchorScheme {
    AnchorScheme::new("seismic", &SEISMIC)
}

pub fn vlag() -> AnchorScheme {
    AnchorScheme::new("vlag", &VLAG)
}

pub fn icefire() -> AnchorScheme {
    AnchorScheme::new("icefire", &ICEFIRE)
}

/// RdBu - red to blue through white
pub fn rdbu() -> PresetScheme {
    PresetScheme::new("rdbu", colorgrad::rd_bu)
}

pub fn spectral() -> PresetScheme {
    PresetScheme::new("spectral", colorgrad::spectral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::schemes::ColorScheme;

    #[test]
    fn test_scheme_names() {
        assert_eq!(coolwarm().name(), "coolwarm");
        assert_eq!(rdbu().name(), "rdbu");
        assert_eq!(seismic().name(), "seismic");
        assert_eq!(vlag().name(), "vlag");
        assert_eq!(icefire().name(), "icefire");
    }

    #[test]
    fn test_coolwarm_bounds() {
        let scheme = coolwarm();

        let blue = scheme.at(0.0);
        let red = scheme.at(1.0);
        assert!(blue.b > blue.r);
        assert!(red.r > red.b);

        // Middle should be close to white/light gray
        let middle = scheme.at(0.5);
        assert!(middle.r > 0.78);
        assert!(middle.g > 0.78);
        assert!(middle.b > 0.78);
    }

    #[test]
    fn test_seismic_middle() {
        assert_eq!(seismic().at(0.5), Rgb::WHITE);
    }

    #[test]
    fn test_rdbu_starts_red() {
        let start = rdbu().at(0.0);
        assert!(start.r > start.b);
    }
}
