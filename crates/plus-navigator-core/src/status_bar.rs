// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Status-bar domain values: background colour, foreground style, and the
// state record each native service owns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NavigatorError, Result};

/// Opaque RGB colour of the status-bar background.
///
/// Always rendered as `#RRGGBB` (upper-case hex). Alpha is never stored: the
/// status bar is drawn opaque on both platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Named colours accepted in addition to hex notation.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("darkgray", 0x444444),
    ("darkgrey", 0x444444),
    ("gray", 0x888888),
    ("grey", 0x888888),
    ("lightgray", 0xCCCCCC),
    ("lightgrey", 0xCCCCCC),
    ("white", 0xFFFFFF),
    ("red", 0xFF0000),
    ("green", 0x00FF00),
    ("blue", 0x0000FF),
    ("yellow", 0xFFFF00),
    ("cyan", 0x00FFFF),
    ("magenta", 0xFF00FF),
    ("aqua", 0x00FFFF),
    ("fuchsia", 0xFF00FF),
    ("lime", 0x00FF00),
    ("maroon", 0x800000),
    ("navy", 0x000080),
    ("olive", 0x808000),
    ("purple", 0x800080),
    ("silver", 0xC0C0C0),
    ("teal", 0x008080),
];

impl Color {
    pub const BLACK: Color = Color::from_rgb(0x000000);
    pub const WHITE: Color = Color::from_rgb(0xFFFFFF);

    /// Build a colour from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Packed `0xRRGGBB` value.
    pub const fn to_rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Build a colour from a signed ARGB int as handed out by Android
    /// (`Window.getStatusBarColor`). The alpha channel is discarded.
    pub const fn from_argb(argb: i32) -> Self {
        Self::from_rgb(argb as u32 & 0x00FF_FFFF)
    }

    /// Fully opaque signed ARGB int, suitable for `Window.setStatusBarColor`.
    pub const fn to_argb(self) -> i32 {
        (0xFF00_0000 | self.to_rgb()) as i32
    }

    /// Normalised channel values in `0.0..=1.0`, as UIKit expects.
    pub fn to_unit_rgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Parse a caller-supplied colour string.
    ///
    /// Accepts `RRGGBB` or `AARRGGBB` hex with an optional leading `#`
    /// (case-insensitive, surrounding whitespace ignored) and a small set of
    /// named colours. Alpha in the eight-digit form is dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if let Some((_, rgb)) = NAMED_COLORS.iter().find(|(name, _)| *name == lowered) {
            return Ok(Self::from_rgb(*rgb));
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(NavigatorError::InvalidColor(input.to_owned()));
        }
        match hex.len() {
            6 | 8 => u32::from_str_radix(hex, 16)
                .map(Self::from_rgb)
                .map_err(|_| NavigatorError::InvalidColor(input.to_owned())),
            _ => Err(NavigatorError::InvalidColor(input.to_owned())),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.to_rgb())
    }
}

impl FromStr for Color {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = NavigatorError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Tint of the status-bar icons and text.
///
/// `Light` means light content (for dark backgrounds); `Dark` means dark
/// content (for light backgrounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarStyle {
    #[default]
    Light,
    Dark,
}

impl StatusBarStyle {
    /// Wire keyword for this style.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for StatusBarStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusBarStyle {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(NavigatorError::InvalidStyle(s.to_owned())),
        }
    }
}

/// Last applied status-bar appearance. One instance per native service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusBarState {
    pub background: Color,
    pub style: StatusBarStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Color::parse("#FF0000").unwrap(), Color::from_rgb(0xFF0000));
        assert_eq!(Color::parse("00ff7f").unwrap(), Color::from_rgb(0x00FF7F));
        assert_eq!(Color::parse("  #1a2B3c \n").unwrap(), Color::from_rgb(0x1A2B3C));
    }

    #[test]
    fn eight_digit_hex_drops_alpha() {
        assert_eq!(Color::parse("#80FF0000").unwrap(), Color::from_rgb(0xFF0000));
    }

    #[test]
    fn named_colors_are_case_insensitive() {
        assert_eq!(Color::parse("Teal").unwrap(), Color::from_rgb(0x008080));
        assert_eq!(Color::parse("WHITE").unwrap(), Color::WHITE);
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["notacolor", "", "#", "#FFF", "#GG0000", "#FF00000", "# FF0000"] {
            assert!(
                matches!(Color::parse(bad), Err(NavigatorError::InvalidColor(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn display_is_upper_case_with_hash() {
        assert_eq!(Color::parse("abcdef").unwrap().to_string(), "#ABCDEF");
        assert_eq!(Color::default().to_string(), "#000000");
    }

    #[test]
    fn argb_conversion_ignores_alpha() {
        let color = Color::from_argb(0x7F12_3456);
        assert_eq!(color.to_string(), "#123456");
        assert_eq!(Color::from_argb(color.to_argb()), color);
        assert_eq!(Color::WHITE.to_argb(), -1);
    }

    #[test]
    fn color_serializes_as_string() {
        let json = serde_json::to_string(&Color::from_rgb(0x00AA00)).unwrap();
        assert_eq!(json, "\"#00AA00\"");
        let back: Color = serde_json::from_str("\"#00aa00\"").unwrap();
        assert_eq!(back, Color::from_rgb(0x00AA00));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn style_parsing() {
        assert_eq!("dark".parse::<StatusBarStyle>().unwrap(), StatusBarStyle::Dark);
        assert_eq!("light".parse::<StatusBarStyle>().unwrap(), StatusBarStyle::Light);
        assert!(matches!(
            "dim".parse::<StatusBarStyle>(),
            Err(NavigatorError::InvalidStyle(_))
        ));
    }

    #[test]
    fn style_keywords_are_exact() {
        for input in ["Light", "DARK", " dark", "light\n"] {
            assert!(
                matches!(
                    input.parse::<StatusBarStyle>(),
                    Err(NavigatorError::InvalidStyle(_))
                ),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn default_state_is_black_and_light() {
        let state = StatusBarState::default();
        assert_eq!(state.background, Color::BLACK);
        assert_eq!(state.style, StatusBarStyle::Light);
    }
}
