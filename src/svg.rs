//! Composing the SVG document.
//!
//! The document is a background rectangle in the light color, one rectangle
//! per merged block of dark modules, and optionally a logo on top. All numbers
//! go through [`format_number`], so output never depends on the host locale
//! and is identical between runs.

use tracing::{debug, warn};

use crate::error::{RenderError, RenderResult};
use crate::logo::{Logo, LogoBox, LogoPayload};
use crate::markup::MarkupRoot;
use crate::matrix::{Crop, ModuleMatrix};
use crate::merge::{merge_modules, ModuleRect, Rect};
use crate::options::{SizingMode, SvgOptions, ViewBox};

/// Logos wider than this share of the symbol may hide more than error
/// correction can restore.
const LOGO_WARN_PERCENT: u8 = 30;

/// Renders a [`ModuleMatrix`] as SVG.
///
/// # Example
///
/// ```rust
/// use qirust_svg::matrix::ModuleMatrix;
/// use qirust_svg::options::SvgOptions;
/// use qirust_svg::svg::SvgRenderer;
///
/// let matrix = ModuleMatrix::from_fn(3, |_, _| true);
/// let svg = SvgRenderer::new(&matrix).render(10, &SvgOptions::default()).unwrap();
///
/// assert!(svg.contains(r##"<rect x="0" y="0" width="30" height="30" fill="#000000" />"##));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer<'a> {
    matrix: &'a ModuleMatrix,
}

/// Geometry shared by every part of one render.
struct Layout {
    crop: Crop,
    pixels_per_module: f64,
    qr_size: f64,
    logo_box: Option<LogoBox>,
    /// Set only when the logo clears its background.
    exclusion: Option<LogoBox>,
}

impl<'a> SvgRenderer<'a> {
    pub fn new(matrix: &'a ModuleMatrix) -> Self {
        Self { matrix }
    }

    /// Renders with every drawn module `pixels_per_module` units wide.
    ///
    /// The view box is exactly as large as the drawn modules, so cropping the
    /// quiet zone shrinks the document rather than enlarging the modules.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidArgument`] if `pixels_per_module` is zero,
    /// plus everything [`SvgRenderer::render_in`] can return.
    pub fn render(&self, pixels_per_module: u32, options: &SvgOptions) -> RenderResult<String> {
        if pixels_per_module == 0 {
            return Err(RenderError::invalid_argument(
                "pixels per module must be positive",
            ));
        }
        let crop = self.matrix.crop(options.draw_quiet_zones)?;
        let edge = crop.count as f64 * f64::from(pixels_per_module);
        self.render_in(ViewBox::square(edge), options)
    }

    /// Renders into `view_box`, scaling modules so the drawn area fills it.
    ///
    /// # Errors
    ///
    /// - [`RenderError::InvalidArgument`] for a non-positive view box, a logo
    ///   above 100 percent, or a crop that leaves no modules.
    /// - [`RenderError::Parse`] if an embedded logo has no well-formed root.
    pub fn render_in(&self, view_box: ViewBox, options: &SvgOptions) -> RenderResult<String> {
        let layout = self.layout(view_box, options)?;
        let rects = self.merge(&layout);

        // Prepare the overlay first so a bad logo fails before any output.
        let overlay = match (&options.logo, &layout.logo_box) {
            (Some(logo), Some(logo_box)) => Some(logo_overlay(logo, logo_box)?),
            _ => None,
        };

        let mut result = String::with_capacity(256 + rects.len() * 80);
        result += &format!(
            "<svg version=\"1.1\" baseProfile=\"full\" shape-rendering=\"crispEdges\" {} xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n",
            size_attributes(view_box, options.sizing_mode)
        );
        result += &format!(
            "<rect x=\"0\" y=\"0\" width=\"{0}\" height=\"{0}\" fill=\"{1}\" />\n",
            format_number(layout.qr_size),
            options.colors.light
        );
        for rect in &rects {
            let Rect {
                x,
                y,
                width,
                height,
            } = rect.to_rect(layout.pixels_per_module);
            result += &format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" />\n",
                format_number(x),
                format_number(y),
                format_number(width),
                format_number(height),
                options.colors.dark
            );
        }
        if let Some(overlay) = overlay {
            result += &overlay;
        }
        result += "</svg>\n";

        debug!(
            rects = rects.len(),
            bytes = result.len(),
            "rendered svg document"
        );
        Ok(result)
    }

    /// The dark rectangles [`SvgRenderer::render_in`] would draw, in view box
    /// units and document order.
    pub fn merged_rectangles(
        &self,
        view_box: ViewBox,
        options: &SvgOptions,
    ) -> RenderResult<Vec<Rect>> {
        let layout = self.layout(view_box, options)?;
        Ok(self
            .merge(&layout)
            .into_iter()
            .map(|rect| rect.to_rect(layout.pixels_per_module))
            .collect())
    }

    /// Like [`SvgRenderer::merged_rectangles`], measured in modules of the
    /// drawn window.
    pub fn module_rectangles(
        &self,
        view_box: ViewBox,
        options: &SvgOptions,
    ) -> RenderResult<Vec<ModuleRect>> {
        let layout = self.layout(view_box, options)?;
        Ok(self.merge(&layout))
    }

    fn merge(&self, layout: &Layout) -> Vec<ModuleRect> {
        merge_modules(
            self.matrix,
            layout.crop,
            layout.pixels_per_module,
            layout.exclusion.as_ref(),
        )
    }

    fn layout(&self, view_box: ViewBox, options: &SvgOptions) -> RenderResult<Layout> {
        view_box.validate()?;
        let crop = self.matrix.crop(options.draw_quiet_zones)?;
        let pixels_per_module = view_box.width.min(view_box.height) / crop.count as f64;

        let logo_box = match &options.logo {
            Some(logo) => {
                if logo.size_percent() > 100 {
                    return Err(RenderError::invalid_argument(format!(
                        "logo size must be within 0..=100 percent, got {}",
                        logo.size_percent()
                    )));
                }
                if logo.size_percent() > LOGO_WARN_PERCENT {
                    warn!(
                        size_percent = logo.size_percent(),
                        "logo may cover more modules than error correction can restore"
                    );
                }
                Some(logo.bounding_box(view_box))
            }
            None => None,
        };
        let exclusion = match &options.logo {
            Some(logo) if logo.fill_background() => logo_box,
            _ => None,
        };

        debug!(
            size = self.matrix.size(),
            dark = self.matrix.dark_count(),
            offset = crop.offset,
            modules = crop.count,
            pixels_per_module,
            sizing_mode = ?options.sizing_mode,
            logo = options.logo.is_some(),
            "svg layout"
        );

        Ok(Layout {
            crop,
            pixels_per_module,
            qr_size: crop.count as f64 * pixels_per_module,
            logo_box,
            exclusion,
        })
    }
}

fn size_attributes(view_box: ViewBox, sizing_mode: SizingMode) -> String {
    let width = format_number(view_box.width);
    let height = format_number(view_box.height);
    match sizing_mode {
        SizingMode::WidthHeightAttribute => format!("width=\"{}\" height=\"{}\"", width, height),
        SizingMode::ViewBoxAttribute => format!("viewBox=\"0 0 {} {}\"", width, height),
    }
}

/// The markup drawn on top of the modules for `logo`, newline terminated.
fn logo_overlay(logo: &Logo, logo_box: &LogoBox) -> RenderResult<String> {
    match logo.payload() {
        LogoPayload::Raster { .. } | LogoPayload::VectorLinked { .. } => {
            let mut result = String::new();
            result += "<svg width=\"100%\" height=\"100%\" version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\">\n";
            result += &format!(
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" xlink:href=\"{}\" />\n",
                format_number(logo_box.x),
                format_number(logo_box.y),
                format_number(logo_box.width),
                format_number(logo_box.height),
                logo.data_uri()
            );
            result += "</svg>\n";
            Ok(result)
        }
        LogoPayload::VectorEmbedded { markup } => {
            let mut root = MarkupRoot::parse(markup)?;
            debug!(root = root.name(), "inlining vector logo");
            root.set_attribute("x", &format_number(logo_box.x));
            root.set_attribute("y", &format_number(logo_box.y));
            root.set_attribute("width", &format_number(logo_box.width));
            root.set_attribute("height", &format_number(logo_box.height));
            root.set_attribute("shape-rendering", "geometricPrecision");
            let mut result = root.serialize().replace("svg:", "");
            result.push('\n');
            Ok(result)
        }
    }
}

/// Formats a coordinate with 15 significant digits.
///
/// Always uses `.` as the decimal separator and never an exponent; trailing
/// zeros are dropped and negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    let rounded = format!("{:.14e}", value).parse::<f64>().unwrap_or(value);
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}
