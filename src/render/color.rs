//! sRGB colors as they appear in config files (`"#rrggbb"`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
    }

    pub fn to_hex(self) -> u32 {
        let [r, g, b] = self.0;
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    /// Scale each channel by `k`, saturating at white.
    pub fn shade(self, k: f32) -> Self {
        let k = k.max(0.0);
        Self(self.0.map(|c| (c as f32 * k).round().min(255.0) as u8))
    }

    /// Blend toward white by `t` in 0..=1.
    pub fn lighten(self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self(self.0.map(|c| (c as f32 + (255.0 - c as f32) * t).round() as u8))
    }

    pub fn to_color32(self) -> egui::Color32 {
        let [r, g, b] = self.0;
        egui::Color32::from_rgb(r, g, b)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        format!("#{:06x}", c.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(format!("expected #rrggbb, got {:?}", s));
        }
        u32::from_str_radix(digits, 16)
            .map(Rgb::from_hex)
            .map_err(|e| format!("bad color {:?}: {}", s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip_through_string() {
        let c = Rgb::from_hex(0x40c463);
        assert_eq!(c.0, [0x40, 0xc4, 0x63]);
        let s: String = c.into();
        assert_eq!(s, "#40c463");
        assert_eq!(Rgb::try_from(s).unwrap(), c);
    }

    #[test]
    fn rejects_short_strings() {
        assert!(Rgb::try_from("#fff".to_string()).is_err());
    }

    #[test]
    fn shade_saturates() {
        assert_eq!(Rgb([200, 100, 0]).shade(2.0).0, [255, 200, 0]);
        assert_eq!(Rgb([200, 100, 0]).shade(0.5).0, [100, 50, 0]);
    }

    #[test]
    fn lighten_reaches_white() {
        assert_eq!(Rgb([0, 100, 255]).lighten(1.0).0, [255, 255, 255]);
        assert_eq!(Rgb([0, 100, 255]).lighten(0.0).0, [0, 100, 255]);
    }
}
