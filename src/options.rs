//! Render options.
//!
//! Everything except the logo can be loaded from any serde format; every
//! field falls back to its default when missing.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::logo::Logo;

/// The logical coordinate space the document is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(edge: f64) -> Self {
        Self::new(edge, edge)
    }

    /// Checks that both dimensions are finite and positive.
    pub fn validate(&self) -> RenderResult<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(RenderError::invalid_argument(format!(
                "view box must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Fill colors for dark and light modules. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPair {
    pub dark: String,
    pub light: String,
}

impl ColorPair {
    pub fn new(dark: impl Into<String>, light: impl Into<String>) -> Self {
        Self {
            dark: dark.into(),
            light: light.into(),
        }
    }

    /// Builds a pair from RGB triples, e.g. `[255, 165, 0]` becomes `#FFA500`.
    pub fn from_rgb(dark: [u8; 3], light: [u8; 3]) -> Self {
        Self::new(rgb_to_hex(dark), rgb_to_hex(light))
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new("#000000", "#FFFFFF")
    }
}

fn rgb_to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// How the document declares its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Absolute `width` and `height` attributes.
    #[default]
    WidthHeightAttribute,
    /// A scalable `viewBox="0 0 w h"` attribute.
    ViewBoxAttribute,
}

/// Options for a single render.
///
/// # Example
///
/// ```rust
/// use qirust_svg::options::{SizingMode, SvgOptions};
///
/// let options = SvgOptions::default()
///     .with_colors("#1A1A1A", "#FAFAFA")
///     .with_quiet_zones(false)
///     .with_sizing_mode(SizingMode::ViewBoxAttribute);
///
/// assert!(!options.draw_quiet_zones);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    pub colors: ColorPair,

    /// Whether the quiet zone border is part of the drawing.
    pub draw_quiet_zones: bool,

    pub sizing_mode: SizingMode,

    #[serde(skip)]
    pub logo: Option<Logo>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            colors: ColorPair::default(),
            draw_quiet_zones: true,
            sizing_mode: SizingMode::default(),
            logo: None,
        }
    }
}

impl SvgOptions {
    pub fn with_colors(mut self, dark: impl Into<String>, light: impl Into<String>) -> Self {
        self.colors = ColorPair::new(dark, light);
        self
    }

    pub fn with_quiet_zones(mut self, draw_quiet_zones: bool) -> Self {
        self.draw_quiet_zones = draw_quiet_zones;
        self
    }

    pub fn with_sizing_mode(mut self, sizing_mode: SizingMode) -> Self {
        self.sizing_mode = sizing_mode;
        self
    }

    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(logo);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb() {
        let colors = ColorPair::from_rgb([255, 165, 0], [0, 0, 0]);
        assert_eq!(colors.dark, "#FFA500");
        assert_eq!(colors.light, "#000000");
    }

    #[test]
    fn test_view_box_validation() {
        assert!(ViewBox::new(10.0, 20.0).validate().is_ok());
        assert!(ViewBox::new(0.0, 20.0).validate().is_err());
        assert!(ViewBox::new(10.0, -1.0).validate().is_err());
        assert!(ViewBox::new(f64::NAN, 1.0).validate().is_err());
        assert!(ViewBox::new(f64::INFINITY, 1.0).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_options() {
        let options: SvgOptions = serde_json::from_str(
            r##"{ "colors": { "dark": "#112233" }, "sizing_mode": "view_box_attribute" }"##,
        )
        .unwrap();
        assert_eq!(options.colors.dark, "#112233");
        assert_eq!(options.colors.light, "#FFFFFF");
        assert!(options.draw_quiet_zones);
        assert_eq!(options.sizing_mode, SizingMode::ViewBoxAttribute);
        assert!(options.logo.is_none());
    }

    #[test]
    fn test_serialize_round_trips_through_json() {
        let options = SvgOptions::default().with_quiet_zones(false);
        let json = serde_json::to_string(&options).unwrap();
        let back: SvgOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
