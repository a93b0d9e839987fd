use crate::error::RenderResult;
use crate::matrix::ModuleMatrix;
use crate::options::SvgOptions;
use crate::svg::SvgRenderer;

/*---- Utilities ----*/

/// Renders a matrix as SVG with black modules on white, quiet zones drawn and
/// absolute width/height attributes.
///
/// # Arguments
///
/// * `matrix` - The modules to draw.
/// * `pixels_per_module` - Edge length of one module in the output.
///
/// # Errors
///
/// Returns [`crate::RenderError::InvalidArgument`] if `pixels_per_module` is
/// zero or the matrix is empty.
///
/// # Example
///
/// ```rust
/// use qirust_svg::helper::to_svg_string;
/// use qirust_svg::matrix::ModuleMatrix;
///
/// let matrix = ModuleMatrix::from_pattern("#.\n.#").unwrap();
/// let svg = to_svg_string(&matrix, 4).unwrap();
///
/// assert!(svg.starts_with("<svg version=\"1.1\""));
/// ```
pub fn to_svg_string(matrix: &ModuleMatrix, pixels_per_module: u32) -> RenderResult<String> {
	SvgRenderer::new(matrix).render(pixels_per_module, &SvgOptions::default())
}

/// Renders a matrix as SVG with the given hex colors.
///
/// # Arguments
///
/// * `matrix` - The modules to draw.
/// * `pixels_per_module` - Edge length of one module in the output.
/// * `dark` - Fill of dark modules, e.g. `#1A1A1A`.
/// * `light` - Fill of the background, e.g. `#FFFFFF`.
pub fn to_svg_string_with_colors(
	matrix: &ModuleMatrix,
	pixels_per_module: u32,
	dark: &str,
	light: &str,
) -> RenderResult<String> {
	let options = SvgOptions::default().with_colors(dark, light);
	SvgRenderer::new(matrix).render(pixels_per_module, &options)
}

/// Draws the matrix as text, two characters per module so it looks square
/// in a terminal. The string always uses Unix newlines (\n).
pub fn to_text_art(matrix: &ModuleMatrix) -> String {
	let mut result = String::with_capacity(matrix.size() * (matrix.size() * 6 + 1));
	for row in 0..matrix.size() {
		for col in 0..matrix.size() {
			let c: char = if matrix.get(row, col) { '█' } else { ' ' };
			result.push(c);
			result.push(c);
		}
		result.push('\n');
	}
	result
}
