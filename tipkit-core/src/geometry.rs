use crate::error::{ConfigError, ConfigResult};
use nalgebra::{Point2, Vector2};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The trigger element's on-screen bounding box, in viewport coordinates.
///
/// The default value (all zeros) stands for "not measured yet"; placing
/// against it degrades to the top-left screen corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width of the element.
    pub width: f64,
    /// Height of the element.
    pub height: f64,
}

impl AnchorRect {
    /// Create a new anchor rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The center point of the rectangle.
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Current screen or window dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl ViewportSize {
    /// Create a new viewport size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A popover dimension: a fixed length, a percentage of the viewport, or intrinsic.
///
/// In configuration files a dimension is either a number (`150`) or a string
/// (`"150"`, `"40%"`, `"auto"`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawDimension")]
pub enum Dimension {
    /// An absolute length in pixels.
    Length(f64),
    /// A percentage (0-100) of the matching viewport axis.
    Percent(f64),
    /// Sized by the popover content; unknown to the placement engine.
    Auto,
}

impl Dimension {
    /// Parse a dimension from its textual form.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Dimension::Auto);
        }

        if let Some(number) = trimmed.strip_suffix('%') {
            return match number.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Ok(Dimension::Percent(value)),
                _ => Err(ConfigError::InvalidPercentage(text.to_string())),
            };
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Dimension::Length(value)),
            _ => Err(ConfigError::InvalidDimension(text.to_string())),
        }
    }

    /// Resolve to an absolute length. Percentages resolve against `against`;
    /// [Dimension::Auto] resolves to zero.
    pub fn resolve(&self, against: f64) -> f64 {
        match self {
            Dimension::Length(length) => *length,
            Dimension::Percent(percent) => percent * against / 100.0,
            Dimension::Auto => 0.0,
        }
    }

    /// Whether this is a fixed pixel length.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Dimension::Length(_))
    }

    /// Whether the size comes from the content.
    pub fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }

    /// Reject negative or non-finite values, naming the setting in the error.
    pub fn validate(&self, name: &'static str) -> ConfigResult<()> {
        match self {
            Dimension::Length(value) | Dimension::Percent(value)
                if !value.is_finite() || *value < 0.0 =>
            {
                Err(ConfigError::OutOfRange {
                    name,
                    value: *value,
                })
            },
            _ => Ok(()),
        }
    }
}

impl From<f64> for Dimension {
    fn from(length: f64) -> Self {
        Dimension::Length(length)
    }
}

impl FromStr for Dimension {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Dimension::parse(text)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Length(length) => write!(f, "{length}"),
            Dimension::Percent(percent) => write!(f, "{percent}%"),
            Dimension::Auto => f.write_str("auto"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Number(f64),
    Text(String),
}

impl TryFrom<RawDimension> for Dimension {
    type Error = ConfigError;

    fn try_from(raw: RawDimension) -> Result<Self, Self::Error> {
        match raw {
            RawDimension::Number(value) if value.is_finite() && value >= 0.0 => {
                Ok(Dimension::Length(value))
            },
            RawDimension::Number(value) => Err(ConfigError::InvalidDimension(value.to_string())),
            RawDimension::Text(text) => Dimension::parse(&text),
        }
    }
}

/// The popover's requested size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverSize {
    /// Requested width.
    pub width: Dimension,
    /// Requested height.
    pub height: Dimension,
}

impl PopoverSize {
    /// Create a new popover size.
    pub fn new(width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Resolve both axes against the viewport: width against its width,
    /// height against its height.
    pub fn resolve(&self, viewport: ViewportSize) -> Vector2<f64> {
        Vector2::new(
            self.width.resolve(viewport.width),
            self.height.resolve(viewport.height),
        )
    }
}

impl Default for PopoverSize {
    fn default() -> Self {
        Self::new(150.0, 40.0)
    }
}
