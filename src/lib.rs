//! # qirust-svg
//!
//! Renders QR module matrices into compact SVG documents.
//!
//! `qirust-svg` takes the square grid of dark and light modules produced by a QR encoder and
//! writes an SVG 1.1 document. Dark modules are merged into as few rectangles as a fast greedy
//! pass allows, numbers are written the same way on every platform, and an optional logo can be
//! placed at the center with the modules beneath it cleared.
//!
//! ## Features
//!
//! - Merge horizontal runs of dark modules, then stack equal runs vertically.
//! - Custom dark/light colors.
//! - Size the document with `width`/`height` attributes or a scalable `viewBox`.
//! - Draw or crop the 4-module quiet zone.
//! - Overlay raster or vector logos, linked through a data URI or inlined.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qirust-svg = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render a symbol with an inlined vector logo:
//!
//! ```rust
//! use qirust_svg::{Logo, ModuleMatrix, SizingMode, SvgOptions, SvgRenderer, ViewBox};
//!
//! // A real matrix comes from a QR encoder.
//! let matrix = ModuleMatrix::from_fn(29, |row, col| (row * 7 + col * 3) % 5 == 0);
//!
//! let options = SvgOptions::default()
//!     .with_colors("#1A1A1A", "#FFFFFF")
//!     .with_quiet_zones(false)
//!     .with_sizing_mode(SizingMode::ViewBoxAttribute)
//!     .with_logo(Logo::vector_embedded(r#"<svg viewBox="0 0 1 1"><circle cx=".5" cy=".5" r=".5"/></svg>"#));
//!
//! let svg = SvgRenderer::new(&matrix).render_in(ViewBox::square(210.0), &options).unwrap();
//! assert!(svg.contains(r#"viewBox="0 0 210 210""#));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: The module matrix and quiet zone cropping.
//! - [`merge`]: Merging dark modules into rectangles.
//! - [`logo`]: Logo payloads and the area they clear.
//! - [`markup`]: Minimal markup tree used to inline vector logos.
//! - [`svg`]: Document composition.
//! - [`options`]: Render options.
//! - [`helper`]: One-call renderers and text output.

#![forbid(unsafe_code)]

pub mod error;
pub mod helper;
pub mod logo;
pub mod markup;
pub mod matrix;
pub mod merge;
pub mod options;
pub mod svg;

pub use error::{RenderError, RenderResult};
pub use logo::{Logo, LogoBox, LogoPayload, MediaType};
pub use matrix::{ModuleMatrix, QUIET_ZONE};
pub use merge::{ModuleRect, Rect};
pub use options::{ColorPair, SizingMode, SvgOptions, ViewBox};
pub use svg::SvgRenderer;
