//! Enumerated preference values: rating thresholds and themes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Rating thresholds
// ---------------------------------------------------------------------------

/// Tolerance when matching a raw number against an allowed threshold.
const THRESHOLD_TOLERANCE: f64 = 1e-9;

/// A minimum star rating applied to the external experience list.
///
/// Only the three thresholds offered by the rating dropdown are
/// representable. On the wire and in storage the threshold is a plain
/// JSON number (`4`, `4.5`, `5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum RatingThreshold {
    /// Four stars and up.
    Four,
    /// Four and a half stars and up.
    FourAndHalf,
    /// Five stars only.
    Five,
}

/// A number that is not one of the allowed rating thresholds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0:?} is not an allowed rating threshold (expected 4, 4.5, or 5)")]
pub struct InvalidThreshold(pub String);

impl RatingThreshold {
    /// Every threshold, in dropdown order.
    pub const ALL: [Self; 3] = [Self::Four, Self::FourAndHalf, Self::Five];

    /// The numeric threshold.
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Four => 4.0,
            Self::FourAndHalf => 4.5,
            Self::Five => 5.0,
        }
    }

    /// Dropdown label (`4+`, `4.5+`, `5`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Four => "4+",
            Self::FourAndHalf => "4.5+",
            Self::Five => "5",
        }
    }

    /// Whether a rating meets this threshold.
    pub fn admits(self, rating: f64) -> bool {
        rating >= self.as_f64()
    }

    /// Parse a dropdown value. The empty string means "All" (no filter).
    pub fn parse_option(value: &str) -> Result<Option<Self>, InvalidThreshold> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        let number = value
            .parse::<f64>()
            .map_err(|_parse_err| InvalidThreshold(value.to_owned()))?;
        Self::try_from(number).map(Some)
    }
}

impl TryFrom<f64> for RatingThreshold {
    type Error = InvalidThreshold;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|t| (t.as_f64() - value).abs() < THRESHOLD_TOLERANCE)
            .ok_or_else(|| InvalidThreshold(value.to_string()))
    }
}

impl From<RatingThreshold> for f64 {
    fn from(threshold: RatingThreshold) -> Self {
        threshold.as_f64()
    }
}

impl core::fmt::Display for RatingThreshold {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Themes
// ---------------------------------------------------------------------------

/// A colour theme selectable from the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Theme {
    /// White background, dark text.
    Light,
    /// Dark background; toggles the `dark` class on the document root.
    Dark,
    /// Pale blue palette.
    Blue,
    /// Pale green palette.
    Green,
    /// Pale purple palette.
    Purple,
}

/// CSS class names the presentation layer derives from a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Page background class.
    pub background: &'static str,
    /// Body text class.
    pub text: &'static str,
    /// Primary accent class.
    pub primary: &'static str,
    /// Secondary surface class.
    pub secondary: &'static str,
}

/// An identifier that does not name a theme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0:?}")]
pub struct UnknownTheme(pub String);

impl Theme {
    /// Every theme, in menu order.
    pub const ALL: [Self; 5] = [Self::Light, Self::Dark, Self::Blue, Self::Green, Self::Purple];

    /// The stored identifier (`light`, `dark`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
        }
    }

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Purple => "Purple",
        }
    }

    /// Whether the document root should carry the `dark` class.
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Theme used when nothing is stored: dark on the landing page,
    /// light everywhere else.
    pub fn default_for_route(path: &str) -> Self {
        if path == "/" { Self::Dark } else { Self::Light }
    }

    /// Class names for this theme.
    pub const fn palette(self) -> ThemePalette {
        match self {
            Self::Light => ThemePalette {
                background: "bg-white",
                text: "text-gray-900",
                primary: "bg-blue-500",
                secondary: "bg-gray-200",
            },
            Self::Dark => ThemePalette {
                background: "bg-gray-900",
                text: "text-gray-100",
                primary: "bg-blue-600",
                secondary: "bg-gray-700",
            },
            Self::Blue => ThemePalette {
                background: "bg-blue-50",
                text: "text-blue-900",
                primary: "bg-blue-500",
                secondary: "bg-blue-200",
            },
            Self::Green => ThemePalette {
                background: "bg-green-50",
                text: "text-green-900",
                primary: "bg-green-500",
                secondary: "bg-green-200",
            },
            Self::Purple => ThemePalette {
                background: "bg-purple-50",
                text: "text-purple-900",
                primary: "bg-purple-500",
                secondary: "bg-purple-200",
            },
        }
    }
}

impl core::str::FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownTheme(s.to_owned()))
    }
}

impl core::fmt::Display for Theme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
