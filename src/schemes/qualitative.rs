//! Qualitative schemes (distinct swatches for categorical data).

use super::scheme::QualitativeScheme;

static TAB10: [[u8; 3]; 10] = [
    [31, 119, 180],  // blue
    [255, 127, 14],  // orange
    [44, 160, 44],   // green
    [214, 39, 40],   // red
    [148, 103, 189], // purple
    [140, 86, 75],   // brown
    [227, 119, 194], // pink
    [127, 127, 127], // gray
    [188, 189, 34],  // olive
    [23, 190, 207],  // cyan
];

static SET2: [[u8; 3]; 8] = [
    [102, 194, 165],
    [252, 141, 98],
    [141, 160, 203],
    [231, 138, 195],
    [166, 216, 84],
    [255, 217, 47],
    [229, 196, 148],
    [179, 179, 179],
];

static PAIRED: [[u8; 3]; 12] = [
    [166, 206, 227],
    [31, 120, 180],
    [178, 223, 138],
    [51, 160, 44],
    [251, 154, 153],
    [227, 26, 28],
    [253, 191, 111],
    [255, 127, 0],
    [202, 178, 214],
    [106, 61, 154],
    [255, 255, 153],
    [177, 89, 40],
];

/// Okabe & Ito colorblind-safe set
static OKABE_ITO: [[u8; 3]; 8] = [
    [230, 159, 0],   // orange
    [86, 180, 233],  // sky blue
    [0, 158, 115],   // bluish green
    [240, 228, 66],  // yellow
    [0, 114, 178],   // blue
    [213, 94, 0],    // vermillion
    [204, 121, 167], // reddish purple
    [0, 0, 0],       // black
];

pub fn tab10() -> QualitativeScheme {
    QualitativeScheme::new("tab10", &TAB10)
}

pub fn set2() -> QualitativeScheme {
    QualitativeScheme::new("set2", &SET2)
}

pub fn paired() -> QualitativeScheme {
    QualitativeScheme::new("paired", &PAIRED)
}

pub fn okabe_ito() -> QualitativeScheme {
    QualitativeScheme::new("okabe_ito", &OKABE_ITO)
}
