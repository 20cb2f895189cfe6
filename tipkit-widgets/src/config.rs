use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tipkit_core::geometry::{Dimension, PopoverSize};
use tipkit_core::host::CloseNotification;
use tipkit_core::{ConfigError, ConfigResult};
use tipkit_theme::TooltipStyle;

/// Default popover width.
pub const DEFAULT_WIDTH: f64 = 150.0;

/// Default popover height.
pub const DEFAULT_HEIGHT: f64 = 40.0;

/// Which gesture on the trigger toggles the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// A regular press.
    #[default]
    Press,
    /// A long press.
    LongPress,
    /// No gesture; visibility is driven by the application.
    None,
}

/// A gesture reported by the host's gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// A regular press.
    Press,
    /// A long press.
    LongPress,
}

impl ActionType {
    /// Whether `gesture` fires the trigger.
    pub fn accepts(&self, gesture: Gesture) -> bool {
        matches!(
            (self, gesture),
            (ActionType::Press, Gesture::Press) | (ActionType::LongPress, Gesture::LongPress)
        )
    }
}

/// Host-facing configuration of a tooltip.
///
/// Built programmatically with the `with_*` methods, or loaded from TOML:
///
/// ```toml
/// with_pointer = true
/// width = "60%"
/// height = 40
/// action_type = "long_press"
///
/// [style]
/// background_color = "#617080"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipConfig {
    /// Draw an arrow pointing from the popover to the trigger.
    pub with_pointer: bool,
    /// Popover width.
    pub width: Dimension,
    /// Popover height.
    pub height: Dimension,
    /// Colors and shape.
    pub style: TooltipStyle,
    /// Dim the rest of the screen while the popover is shown.
    pub with_overlay: bool,
    /// Which gesture toggles the tooltip.
    pub action_type: ActionType,
    /// When set, the application owns visibility for the widget's whole lifetime.
    pub is_visible: Option<bool>,
    /// Only a press on the dimming layer closes the popover, not a press on the popover itself.
    pub close_only_on_backdrop_press: bool,
    /// Ignore the platform's vertical offset correction.
    pub skip_platform_offset: bool,
    /// Override the platform's default close notification policy.
    pub close_notification: Option<CloseNotification>,
}

impl TooltipConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML and validate it.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading tooltip config from: {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tooltip config {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid tooltip config {:?}", path))
    }

    /// Reject sizes the placement arithmetic cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        self.width.validate("width")?;
        self.height.validate("height")?;
        for (name, value) in [
            ("style.corner_radius", self.style.corner_radius),
            ("style.padding", self.style.padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// The requested popover size.
    pub fn popover_size(&self) -> PopoverSize {
        PopoverSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Set whether a pointer is drawn.
    pub fn with_pointer(mut self, with_pointer: bool) -> Self {
        self.with_pointer = with_pointer;
        self
    }

    /// Set the popover width.
    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = width.into();
        self
    }

    /// Set the popover height.
    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = height.into();
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: TooltipStyle) -> Self {
        self.style = style;
        self
    }

    /// Set whether the rest of the screen is dimmed.
    pub fn with_overlay(mut self, with_overlay: bool) -> Self {
        self.with_overlay = with_overlay;
        self
    }

    /// Set the toggling gesture.
    pub fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = action_type;
        self
    }

    /// Hand visibility ownership to the application.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = Some(visible);
        self
    }

    /// Only close from the dimming layer.
    pub fn with_close_only_on_backdrop_press(mut self, value: bool) -> Self {
        self.close_only_on_backdrop_press = value;
        self
    }

    /// Ignore the platform vertical offset.
    pub fn with_skip_platform_offset(mut self, value: bool) -> Self {
        self.skip_platform_offset = value;
        self
    }

    /// Override the close notification policy.
    pub fn with_close_notification(mut self, policy: CloseNotification) -> Self {
        self.close_notification = Some(policy);
        self
    }
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            with_pointer: true,
            width: Dimension::Length(DEFAULT_WIDTH),
            height: Dimension::Length(DEFAULT_HEIGHT),
            style: TooltipStyle::default(),
            with_overlay: true,
            action_type: ActionType::Press,
            is_visible: None,
            close_only_on_backdrop_press: false,
            skip_platform_offset: false,
            close_notification: None,
        }
    }
}
