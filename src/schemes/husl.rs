//! Evenly spaced hues in the HUSL (HSLuv) space.
//!
//! Lightness and saturation stay fixed while the hue walks around the circle,
//! so the colors look equally bright. The hue circle is periodic: `n` samples
//! split it into `n` equal arcs and never repeat the starting hue.

use super::scheme::ColorScheme;
use crate::color::Rgb;

/// Hue offset as a fraction of the circle
const HUE_OFFSET: f64 = 0.01;
const SATURATION: f64 = 0.9 * 99.0;
const LIGHTNESS: f64 = 0.65 * 99.0;

// sRGB D65 matrix and reference white in CIELUV
const M: [[f64; 3]; 3] = [
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.2040, 1.0570],
];
const REF_Y: f64 = 1.0;
const REF_U: f64 = 0.19784;
const REF_V: f64 = 0.46834;
const LAB_E: f64 = 0.008_856_451_6;
const LAB_K: f64 = 903.296_296_2;

pub struct HuslScheme {
    saturation: f64,
    lightness: f64,
}

impl HuslScheme {
    /// `saturation` and `lightness` on the 0-100 HUSL scale
    pub const fn new(saturation: f64, lightness: f64) -> Self {
        Self {
            saturation,
            lightness,
        }
    }

    fn hue_color(&self, t: f64) -> Rgb {
        let hue = ((t + HUE_OFFSET) % 1.0) * 359.0;
        husl_to_rgb(hue, self.saturation, self.lightness)
    }
}

impl ColorScheme for HuslScheme {
    fn name(&self) -> &str {
        "husl"
    }

    fn at(&self, t: f64) -> Rgb {
        self.hue_color(t.clamp(0.0, 1.0))
    }

    fn sample(&self, n: usize) -> Vec<Rgb> {
        (0..n).map(|i| self.hue_color(i as f64 / n as f64)).collect()
    }
}

pub fn husl() -> HuslScheme {
    HuslScheme::new(SATURATION, LIGHTNESS)
}

/// HUSL hue in degrees, saturation and lightness in `[0, 100]`
pub fn husl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let (l, c, h) = husl_to_lch(h, s, l);
    let (l, u, v) = lch_to_luv(l, c, h);
    let [x, y, z] = luv_to_xyz(l, u, v);
    let channel = |row: [f64; 3]| from_linear(row[0] * x + row[1] * y + row[2] * z).clamp(0.0, 1.0);
    Rgb::new(channel(M[0]), channel(M[1]), channel(M[2]))
}

fn husl_to_lch(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if l > 99.999_999_9 {
        return (100.0, 0.0, h);
    }
    if l < 1e-8 {
        return (0.0, 0.0, h);
    }
    (l, max_chroma(l, h) / 100.0 * s, h)
}

/// Largest chroma at this lightness and hue that stays inside sRGB
fn max_chroma(l: f64, h: f64) -> f64 {
    let (sin_h, cos_h) = h.to_radians().sin_cos();
    let sub1 = (l + 16.0).powi(3) / 1_560_896.0;
    let sub2 = if sub1 > LAB_E { sub1 } else { l / LAB_K };

    let mut result = f64::INFINITY;
    for [m1, m2, m3] in M {
        let top = (0.99915 * m1 + 1.05122 * m2 + 1.14460 * m3) * sub2;
        let rbottom = 0.86330 * m3 - 0.17266 * m2;
        let lbottom = 0.12949 * m3 - 0.38848 * m1;
        let bottom = (rbottom * sin_h + lbottom * cos_h) * sub2;

        for t in [0.0, 1.0] {
            let c = l * (top - 1.05122 * t) / (bottom + 0.17266 * sin_h * t);
            if c > 0.0 && c < result {
                result = c;
            }
        }
    }
    result
}

fn lch_to_luv(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let (sin_h, cos_h) = h.to_radians().sin_cos();
    (l, cos_h * c, sin_h * c)
}

fn luv_to_xyz(l: f64, u: f64, v: f64) -> [f64; 3] {
    if l == 0.0 {
        return [0.0, 0.0, 0.0];
    }
    let var_y = f_inv((l + 16.0) / 116.0);
    let var_u = u / (13.0 * l) + REF_U;
    let var_v = v / (13.0 * l) + REF_V;
    let y = var_y * REF_Y;
    let x = -(9.0 * y * var_u) / ((var_u - 4.0) * var_v - var_u * var_v);
    let z = (9.0 * y - 15.0 * var_v * y - var_v * x) / (3.0 * var_v);
    [x, y, z]
}

fn f_inv(t: f64) -> f64 {
    if t.powi(3) > LAB_E {
        t.powi(3)
    } else {
        (116.0 * t - 16.0) / LAB_K
    }
}

fn from_linear(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extreme_lightness() {
        let white = husl_to_rgb(120.0, 50.0, 100.0);
        let black = husl_to_rgb(120.0, 50.0, 0.0);
        assert!(white.channels().iter().all(|c| (c - 1.0).abs() < 1e-3));
        assert_eq!(black, Rgb::BLACK);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let gray = husl_to_rgb(200.0, 0.0, 50.0);
        assert!((gray.r - gray.g).abs() < 1e-3);
        assert!((gray.g - gray.b).abs() < 1e-3);
    }

    #[test]
    fn test_sample_walks_the_hue_circle() {
        let colors = husl().sample(6);
        assert_eq!(colors.len(), 6);
        for c in &colors {
            assert!(c.channels().iter().all(|v| (0.0..=1.0).contains(v)));
        }
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
        // first hue sits just past red
        let first = colors[0];
        assert!(first.r > first.g && first.r > first.b);
    }

    #[test]
    fn test_sample_does_not_repeat_start() {
        let colors = husl().sample(2);
        assert_ne!(colors[0], colors[1]);
        assert_eq!(husl().sample(1)[0], husl().at(0.0));
    }
}
