//! Logos drawn on top of the symbol, and the area they clear.
//!
//! A logo is one of three payloads: raster bytes referenced through a data
//! URI, vector markup referenced the same way, or vector markup inlined into
//! the document. Whatever the payload, the logo sits in a box centered in the
//! view box, and modules touching that box are left out when the logo asks
//! for a clean background.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use image::ImageFormat;

use crate::error::{RenderError, RenderResult};
use crate::options::ViewBox;

/// Media types a logo payload may declare.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MediaType {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
    Svg,
}

impl MediaType {
    /// The MIME string written into data URIs.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Svg => "image/svg+xml",
        }
    }

    pub fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }

    /// Maps a format sniffed from raster bytes onto a media type.
    fn from_image_format(format: ImageFormat) -> RenderResult<Self> {
        match format {
            ImageFormat::Png => Ok(Self::Png),
            ImageFormat::Jpeg => Ok(Self::Jpeg),
            ImageFormat::Gif => Ok(Self::Gif),
            ImageFormat::WebP => Ok(Self::Webp),
            ImageFormat::Bmp => Ok(Self::Bmp),
            other => Err(RenderError::unsupported_media_type(format!("{:?}", other))),
        }
    }
}

impl FromStr for MediaType {
    type Err = RenderError;

    fn from_str(mime: &str) -> RenderResult<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/gif" => Ok(Self::Gif),
            "image/webp" => Ok(Self::Webp),
            "image/bmp" => Ok(Self::Bmp),
            "image/svg+xml" => Ok(Self::Svg),
            _ => Err(RenderError::unsupported_media_type(mime)),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// What a logo is made of and how it ends up in the document.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LogoPayload {
    /// Opaque image bytes, referenced through a base64 data URI.
    Raster { bytes: Vec<u8>, media_type: MediaType },
    /// Vector markup, referenced through a base64 data URI.
    VectorLinked { markup: String },
    /// Vector markup, inlined into the document.
    VectorEmbedded { markup: String },
}

/// A logo placed at the center of the symbol.
///
/// # Example
///
/// ```rust
/// use qirust_svg::logo::Logo;
///
/// let logo = Logo::vector_embedded(r#"<svg viewBox="0 0 1 1"><circle r="1"/></svg>"#)
///     .with_size_percent(20)
///     .with_fill_background(true);
///
/// assert!(logo.is_embedded());
/// assert_eq!(logo.size_percent(), 20);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Logo {
    payload: LogoPayload,
    size_percent: u8,
    fill_background: bool,
}

impl Logo {
    /// Share of the view box the logo covers unless told otherwise.
    pub const DEFAULT_SIZE_PERCENT: u8 = 15;

    fn new(payload: LogoPayload) -> Self {
        Self {
            payload,
            size_percent: Self::DEFAULT_SIZE_PERCENT,
            fill_background: true,
        }
    }

    /// A raster logo with a declared MIME type.
    ///
    /// The bytes are not decoded; only the declared type is checked.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnsupportedMediaType`] if `mime` is unknown or
    /// names a vector format.
    pub fn raster(bytes: impl Into<Vec<u8>>, mime: &str) -> RenderResult<Self> {
        let media_type: MediaType = mime.parse()?;
        if !media_type.is_raster() {
            return Err(RenderError::unsupported_media_type(format!(
                "{} is not a raster format",
                media_type
            )));
        }
        Ok(Self::new(LogoPayload::Raster {
            bytes: bytes.into(),
            media_type,
        }))
    }

    /// A raster logo whose media type is sniffed from its leading bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnsupportedMediaType`] if the format is not
    /// recognized or not one of the supported raster types.
    pub fn raster_detect(bytes: impl Into<Vec<u8>>) -> RenderResult<Self> {
        let bytes = bytes.into();
        let format = image::guess_format(&bytes)
            .map_err(|_| RenderError::unsupported_media_type("unrecognized image data"))?;
        let media_type = MediaType::from_image_format(format)?;
        Ok(Self::new(LogoPayload::Raster { bytes, media_type }))
    }

    /// Vector markup referenced through an image element.
    pub fn vector_linked(markup: impl Into<String>) -> Self {
        Self::new(LogoPayload::VectorLinked {
            markup: markup.into(),
        })
    }

    /// Vector markup inlined into the document.
    pub fn vector_embedded(markup: impl Into<String>) -> Self {
        Self::new(LogoPayload::VectorEmbedded {
            markup: markup.into(),
        })
    }

    pub fn with_size_percent(mut self, size_percent: u8) -> Self {
        self.size_percent = size_percent;
        self
    }

    pub fn with_fill_background(mut self, fill_background: bool) -> Self {
        self.fill_background = fill_background;
        self
    }

    pub fn payload(&self) -> &LogoPayload {
        &self.payload
    }

    pub fn size_percent(&self) -> u8 {
        self.size_percent
    }

    /// Whether modules beneath the logo are left out.
    pub fn fill_background(&self) -> bool {
        self.fill_background
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.payload, LogoPayload::VectorEmbedded { .. })
    }

    pub fn media_type(&self) -> MediaType {
        match &self.payload {
            LogoPayload::Raster { media_type, .. } => *media_type,
            LogoPayload::VectorLinked { .. } | LogoPayload::VectorEmbedded { .. } => {
                MediaType::Svg
            }
        }
    }

    /// The payload as a `data:` URI with standard, padded base64.
    pub fn data_uri(&self) -> String {
        let bytes: &[u8] = match &self.payload {
            LogoPayload::Raster { bytes, .. } => bytes,
            LogoPayload::VectorLinked { markup } | LogoPayload::VectorEmbedded { markup } => {
                markup.as_bytes()
            }
        };
        format!(
            "data:{};base64,{}",
            self.media_type().mime(),
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }

    /// The box this logo occupies inside `view_box`.
    pub fn bounding_box(&self, view_box: ViewBox) -> LogoBox {
        LogoBox::centered(view_box, self.size_percent)
    }
}

/// The area a logo occupies, in view box units.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LogoBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LogoBox {
    /// A box covering `size_percent` of each view box dimension, centered.
    pub fn centered(view_box: ViewBox, size_percent: u8) -> Self {
        let width = f64::from(size_percent) / 100.0 * view_box.width;
        let height = f64::from(size_percent) / 100.0 * view_box.height;
        Self {
            x: view_box.width / 2.0 - width / 2.0,
            y: view_box.height / 2.0 - height / 2.0,
            width,
            height,
        }
    }

    /// Whether the module square at `(x, y)` with side `size` overlaps the box.
    ///
    /// Touching an edge counts as overlapping.
    pub fn blocks(&self, x: f64, y: f64, size: f64) -> bool {
        x + size >= self.x
            && x <= self.x + self.width
            && y + size >= self.y
            && y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_centered_box() {
        let logo_box = LogoBox::centered(ViewBox::new(100.0, 200.0), 20);
        assert_eq!(logo_box.width, 20.0);
        assert_eq!(logo_box.height, 40.0);
        assert_eq!(logo_box.x, 40.0);
        assert_eq!(logo_box.y, 80.0);
    }

    #[test]
    fn test_zero_percent_box_is_a_point() {
        let logo_box = LogoBox::centered(ViewBox::square(100.0), 0);
        assert_eq!((logo_box.x, logo_box.y), (50.0, 50.0));
        assert_eq!((logo_box.width, logo_box.height), (0.0, 0.0));
    }

    #[test]
    fn test_blocks_counts_touching_edges() {
        let logo_box = LogoBox::centered(ViewBox::square(100.0), 20);
        // Ends exactly on the left edge of the box.
        assert!(logo_box.blocks(30.0, 40.0, 10.0));
        // Starts exactly on the right edge of the box.
        assert!(logo_box.blocks(60.0, 40.0, 10.0));
        assert!(logo_box.blocks(45.0, 45.0, 10.0));
        assert!(!logo_box.blocks(20.0, 40.0, 10.0));
        assert!(!logo_box.blocks(70.0, 40.0, 10.0));
        assert!(!logo_box.blocks(40.0, 0.0, 10.0));
    }

    #[test]
    fn test_defaults() {
        let logo = Logo::vector_linked("<svg/>");
        assert_eq!(logo.size_percent(), 15);
        assert!(logo.fill_background());
        assert!(!logo.is_embedded());
        assert_eq!(logo.media_type(), MediaType::Svg);
    }

    #[test]
    fn test_data_uri() {
        let logo = Logo::raster(vec![1u8, 2, 3], "image/png").unwrap();
        assert_eq!(logo.data_uri(), "data:image/png;base64,AQID");

        let logo = Logo::vector_linked("<svg/>");
        assert_eq!(logo.data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn test_raster_rejects_unknown_and_vector_mime() {
        let err = Logo::raster(vec![0u8], "image/tiff-fax").unwrap_err();
        assert_eq!(err, RenderError::unsupported_media_type("image/tiff-fax"));

        let err = Logo::raster(vec![0u8], "image/svg+xml").unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedMediaType { .. }));
    }

    #[test]
    fn test_mime_parsing_is_case_insensitive() {
        assert_eq!("IMAGE/PNG".parse::<MediaType>().unwrap(), MediaType::Png);
        assert_eq!("image/jpg".parse::<MediaType>().unwrap(), MediaType::Jpeg);
    }

    #[test]
    fn test_raster_detect() {
        let mut bytes = PNG_HEADER.to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        let logo = Logo::raster_detect(bytes).unwrap();
        assert_eq!(logo.media_type(), MediaType::Png);

        let err = Logo::raster_detect(b"definitely not an image".to_vec()).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedMediaType { .. }));
    }

    #[test]
    fn test_raster_detect_rejects_recognized_but_unlisted_format() {
        // Little-endian TIFF: known to `image`, not a logo format.
        let mut bytes = b"II*\0".to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        let err = Logo::raster_detect(bytes).unwrap_err();
        assert_eq!(err, RenderError::unsupported_media_type("Tiff"));
    }
}
