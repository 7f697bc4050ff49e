//! Display colour for product variants.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The value does not start with `#`.
    #[error("colour must start with '#'")]
    MissingHash,
    /// The value is not six hex digits after the `#`.
    #[error("colour must be six hexadecimal digits, got {0:?}")]
    InvalidDigits(String),
}

/// A `#RRGGBB` swatch colour.
///
/// Stored in upper case so `#ffd700` and `#FFD700` compare equal.
///
/// ```
/// use larq_core::HexColor;
///
/// let gold = HexColor::parse("#ffd700").unwrap();
/// assert_eq!(gold.as_str(), "#FFD700");
/// assert_eq!(gold.rgb(), (0xFF, 0xD7, 0x00));
/// assert!(HexColor::parse("FFD700").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `#RRGGBB` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the `#` prefix is missing or the remainder is not
    /// exactly six hexadecimal digits.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let digits = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigits(s.to_owned()));
        }

        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// Returns the colour as a `#RRGGBB` string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the red, green and blue channels.
    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: core::ops::Range<usize>| {
            self.0
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .unwrap_or(0)
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }

    /// Whether the swatch is light enough to need a border on a white page.
    #[must_use]
    pub fn is_light(&self) -> bool {
        let (r, g, b) = self.rgb();
        // Rec. 601 luma, scaled by 1000 to stay in integers
        let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
        luma > 200_000
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}
