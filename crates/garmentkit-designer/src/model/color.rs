use std::str::FromStr;

/// An 8-bit RGBA color parsed from the CSS-like strings stored on elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a color, falling back to `fallback` on malformed input.
    pub fn parse_or(value: &str, fallback: Rgba) -> Rgba {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!("Unrecognised color '{}', using fallback", value);
            fallback
        })
    }

    /// Multiply alpha by an element opacity in percent.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let factor = (opacity / 100.0).clamp(0.0, 1.0);
        Self {
            a: (self.a as f64 * factor).round() as u8,
            ..self
        }
    }

    /// Relative luma in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    /// Dark garments get the inverted template image in full exports.
    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

fn hex_pair(bytes: &[u8]) -> Option<u8> {
    Some(hex_digit(bytes[0])? * 16 + hex_digit(bytes[1])?)
}

impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let bytes = hex.as_bytes();
            let parsed = match bytes.len() {
                3 => (|| {
                    Some(Rgba::rgb(
                        hex_digit(bytes[0])? * 17,
                        hex_digit(bytes[1])? * 17,
                        hex_digit(bytes[2])? * 17,
                    ))
                })(),
                6 | 8 => (|| {
                    let mut color = Rgba::rgb(
                        hex_pair(&bytes[0..2])?,
                        hex_pair(&bytes[2..4])?,
                        hex_pair(&bytes[4..6])?,
                    );
                    if bytes.len() == 8 {
                        color.a = hex_pair(&bytes[6..8])?;
                    }
                    Some(color)
                })(),
                _ => None,
            };
            return parsed.ok_or_else(|| format!("Invalid hex color '{}'", s));
        }

        let named = match s.to_lowercase().as_str() {
            "black" => Rgba::BLACK,
            "white" => Rgba::WHITE,
            "red" => Rgba::rgb(255, 0, 0),
            "green" => Rgba::rgb(0, 128, 0),
            "blue" => Rgba::rgb(0, 0, 255),
            "yellow" => Rgba::rgb(255, 255, 0),
            "gray" | "grey" => Rgba::rgb(128, 128, 128),
            "navy" => Rgba::rgb(0, 0, 128),
            "transparent" => Rgba {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            },
            _ => return Err(format!("Unknown color '{}'", s)),
        };
        Ok(named)
    }
}
