use std::fmt;
use std::str::FromStr;

/// Returned by [`hex_to_packed`] when the text is not a `#RRGGBB` literal.
pub const INVALID_HEX: i64 = -1;

/// An RGBA color with 8 bits per channel. Alpha 255 is fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// An opaque color.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn to_packed(self) -> u32 {
        pack_rgba(self.red, self.green, self.blue, self.alpha)
    }

    pub const fn from_packed(packed: u32) -> Self {
        Self {
            red: (packed & 0xFF) as u8,
            green: ((packed >> 8) & 0xFF) as u8,
            blue: ((packed >> 16) & 0xFF) as u8,
            alpha: ((packed >> 24) & 0xFF) as u8,
        }
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    pub fn to_rgb(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Relative luminance in `0.0..=1.0`, weighted per channel (Rec. 601 luma).
    pub fn luminance(self) -> f64 {
        let weighted =
            0.299 * f64::from(self.red) + 0.587 * f64::from(self.green) + 0.114 * f64::from(self.blue);
        (weighted / 255.0).min(1.0)
    }

    /// Scales lightness on a `0..=200` control, HSL style.
    ///
    /// 100 leaves the color untouched, 0 is black and 200 is white. Anything in
    /// between blends the RGB channels toward black or white; alpha is kept.
    pub fn change_lightness(self, level: i32) -> Self {
        if level == 100 {
            return self;
        }
        let level = level.clamp(0, 200);
        let (target, weight) = if level > 100 {
            (255.0, 1.0 - f64::from(level - 100) / 100.0)
        } else {
            (0.0, f64::from(level) / 100.0)
        };
        let blend = |channel: u8| -> u8 {
            let mixed = target + weight * (f64::from(channel) - target);
            mixed.clamp(0.0, 255.0) as u8
        };
        Self {
            red: blend(self.red),
            green: blend(self.green),
            blue: blend(self.blue),
            alpha: self.alpha,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Packs channels into a `u32`, red in the lowest byte and alpha in the highest.
pub const fn pack_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> u32 {
    (alpha as u32) << 24 | (blue as u32) << 16 | (green as u32) << 8 | red as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    InvalidLength(usize),
    MissingHash,
    InvalidHex,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::InvalidLength(len) => {
                write!(f, "expected 7 characters (#RRGGBB), found {}", len)
            }
            ColorParseError::MissingHash => f.write_str("color literal must start with '#'"),
            ColorParseError::InvalidHex => f.write_str("invalid hex digits"),
        }
    }
}

impl std::error::Error for ColorParseError {}

fn parse_channels(hex: &str) -> Result<[u8; 3], ColorParseError> {
    let bytes = hex.as_bytes();
    if bytes.len() != 7 {
        return Err(ColorParseError::InvalidLength(hex.chars().count()));
    }
    if bytes[0] != b'#' {
        return Err(ColorParseError::MissingHash);
    }
    let nibble = |c: u8| -> Result<u8, ColorParseError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(ColorParseError::InvalidHex),
        }
    };
    let mut channels = [0u8; 3];
    for (channel, pair) in channels.iter_mut().zip(bytes[1..].chunks(2)) {
        *channel = nibble(pair[0])? << 4 | nibble(pair[1])?;
    }
    Ok(channels)
}

/// Decodes `#RRGGBB` into `blue << 16 | green << 8 | red`.
///
/// Returns [`INVALID_HEX`] on any malformed input. The textual form never
/// carries alpha, so the top byte is always zero.
pub fn hex_to_packed(hex: &str) -> i64 {
    match parse_channels(hex) {
        Ok([red, green, blue]) => i64::from(pack_rgba(red, green, blue, 0)),
        Err(_) => INVALID_HEX,
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [red, green, blue] = parse_channels(s.trim())?;
        Ok(Color::new(red, green, blue))
    }
}
