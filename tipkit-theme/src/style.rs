use serde::{Deserialize, Serialize};
use vello::peniko::Color;

/// Default popover background, `#617080`.
pub const DEFAULT_BACKGROUND: Color = Color::from_rgb8(0x61, 0x70, 0x80);

/// Default dimming layer color, `rgba(250, 250, 250, 0.7)`.
pub const DEFAULT_OVERLAY: Color = Color::from_rgba8(250, 250, 250, 179);

/// Visual styling of a tooltip.
///
/// ### Configuration
/// ```toml
/// [style]
/// background_color = "#617080"
/// pointer_color = "#4a5561"   # optional, falls back to background_color
/// highlight_color = "transparent"
/// overlay_color = "#fafafab3"
/// corner_radius = 10.0
/// padding = 10.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    /// Popover background.
    #[serde(with = "crate::serde_color")]
    pub background_color: Color,
    /// Pointer color. [None] uses the background color.
    #[serde(with = "crate::serde_color::option", skip_serializing_if = "Option::is_none")]
    pub pointer_color: Option<Color>,
    /// Color drawn behind the trigger while the popover is shown.
    #[serde(with = "crate::serde_color")]
    pub highlight_color: Color,
    /// Color of the dimming layer.
    #[serde(with = "crate::serde_color")]
    pub overlay_color: Color,
    /// Popover corner radius.
    pub corner_radius: f64,
    /// Inner padding of the popover.
    pub padding: f64,
}

impl TooltipStyle {
    /// Create the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background color.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the pointer color.
    pub fn with_pointer_color(mut self, color: Color) -> Self {
        self.pointer_color = Some(color);
        self
    }

    /// Set the highlight color.
    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = color;
        self
    }

    /// Set the overlay color.
    pub fn with_overlay_color(mut self, color: Color) -> Self {
        self.overlay_color = color;
        self
    }

    /// The color the pointer is actually painted with.
    pub fn resolved_pointer_color(&self) -> Color {
        self.pointer_color.unwrap_or(self.background_color)
    }
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND,
            pointer_color: None,
            highlight_color: Color::TRANSPARENT,
            overlay_color: DEFAULT_OVERLAY,
            corner_radius: 10.0,
            padding: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serde_color::to_hex;

    #[test]
    fn test_pointer_falls_back_to_background() {
        let style = TooltipStyle::new();
        assert_eq!(style.resolved_pointer_color(), DEFAULT_BACKGROUND);

        let red = Color::from_rgb8(255, 0, 0);
        assert_eq!(style.with_pointer_color(red).resolved_pointer_color(), red);
    }

    #[test]
    fn test_deserialize_partial_style() {
        let style: TooltipStyle = toml::from_str(
            r##"
            background_color = "#000000"
            pointer_color = "#ff0000"
            "##,
        )
        .unwrap();

        assert_eq!(to_hex(style.background_color), "#000000");
        assert_eq!(to_hex(style.resolved_pointer_color()), "#ff0000");
        assert_eq!(style.highlight_color, Color::TRANSPARENT);
        assert_eq!(style.corner_radius, 10.0);
    }

    #[test]
    fn test_deserialize_rejects_bad_color() {
        let result: Result<TooltipStyle, _> = toml::from_str(r##"background_color = "blue""##);
        assert!(result.is_err());
    }
}
