use crate::common::*;

use crate::errors::chart_error::*;

#[doc = "Straight (non-premultiplied) 8-bit RGBA color, written as `#rrggbbaa`."]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/* CSS names accepted for background colors, on top of the hex forms */
const NAMED_COLORS: [(&str, RgbaColor); 12] = [
    ("transparent", RgbaColor::rgba(0, 0, 0, 0)),
    ("black", RgbaColor::rgb(0, 0, 0)),
    ("white", RgbaColor::rgb(255, 255, 255)),
    ("red", RgbaColor::rgb(255, 0, 0)),
    ("green", RgbaColor::rgb(0, 128, 0)),
    ("blue", RgbaColor::rgb(0, 0, 255)),
    ("yellow", RgbaColor::rgb(255, 255, 0)),
    ("orange", RgbaColor::rgb(255, 165, 0)),
    ("purple", RgbaColor::rgb(128, 0, 128)),
    ("gray", RgbaColor::rgb(128, 128, 128)),
    ("grey", RgbaColor::rgb(128, 128, 128)),
    ("silver", RgbaColor::rgb(192, 192, 192)),
];

impl RgbaColor {
    pub const TRANSPARENT: RgbaColor = RgbaColor::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[doc = r#"
        Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, CSS `rgb()`/`rgba()` or one of the supported
        CSS color names. Whitespace around the value and letter case are ignored.
    "#]
    pub fn parse(input: &str) -> Result<Self, ChartError> {
        let trimmed: String = input.trim().to_ascii_lowercase();
        let invalid = || ChartError::InvalidColor(input.to_string());

        if let Some((_, color)) = NAMED_COLORS.iter().find(|(name, _)| *name == trimmed) {
            return Ok(*color);
        }

        if let Some(color) = parse_functional(&trimmed) {
            return Ok(color);
        }

        let hex: &str = trimmed.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |i: usize| -> u8 {
            let v: u8 = u8::from_str_radix(&hex[i..i + 1], 16).unwrap_or(0);
            v * 17
        };
        let byte = |i: usize| -> u8 { u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0) };

        match hex.len() {
            3 => Ok(RgbaColor::rgb(nibble(0), nibble(1), nibble(2))),
            4 => Ok(RgbaColor::rgba(nibble(0), nibble(1), nibble(2), nibble(3))),
            6 => Ok(RgbaColor::rgb(byte(0), byte(2), byte(4))),
            8 => Ok(RgbaColor::rgba(byte(0), byte(2), byte(4), byte(6))),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn to_pixel(&self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

#[doc = r#"
    CSS functional notation with comma separated arguments. Channels are `0..=255` or percentages,
    alpha is `0..=1` or a percentage. `rgb` and `rgba` both take three or four arguments.
"#]
fn parse_functional(input: &str) -> Option<RgbaColor> {
    let (name, args) = input.strip_suffix(')')?.split_once('(')?;
    if !matches!(name.trim(), "rgb" | "rgba") {
        return None;
    }

    /* `full` is the value that maps to 255 */
    let scaled = |raw: &str, full: f64| -> Option<u8> {
        let (number, full) = match raw.strip_suffix('%') {
            Some(pct) => (pct.trim(), 100.0),
            None => (raw, full),
        };
        let value: f64 = number.parse().ok()?;
        (0.0..=full).contains(&value).then(|| (value * 255.0 / full).round() as u8)
    };
    let channel = |raw: &str| scaled(raw, 255.0);
    let alpha = |raw: &str| scaled(raw, 1.0);

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [r, g, b] => Some(RgbaColor::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => Some(RgbaColor::rgba(channel(r)?, channel(g)?, channel(b)?, alpha(a)?)),
        _ => None,
    }
}

impl std::fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RgbaColor {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RgbaColor::parse(s)
    }
}

impl Serialize for RgbaColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RgbaColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        RgbaColor::parse(&raw).map_err(serde::de::Error::custom)
    }
}
