//! The module matrix handed over by a QR encoder.
//!
//! The renderer never encodes data itself. Whatever produced the symbol (data
//! segments, error correction, masking) hands over a square grid of booleans,
//! `true` meaning a dark module, and this module only knows how to read it.

use crate::error::{RenderError, RenderResult};

/// Width of the blank border an encoder leaves on every edge of the symbol.
pub const QUIET_ZONE: usize = 4;

/// An immutable square grid of dark/light modules, indexed `[row][col]`.
///
/// # Example
///
/// ```rust
/// use qirust_svg::matrix::ModuleMatrix;
///
/// let matrix = ModuleMatrix::from_rows(vec![
///     vec![true, false],
///     vec![false, true],
/// ]).unwrap();
///
/// assert_eq!(matrix.size(), 2);
/// assert!(matrix.get(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Builds a matrix from rows of modules.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidArgument`] if any row length differs from
    /// the number of rows.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> RenderResult<Self> {
        let size = rows.len();
        let mut modules = Vec::with_capacity(size * size);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(RenderError::invalid_argument(format!(
                    "row {} has {} modules, expected {}",
                    index,
                    row.len(),
                    size
                )));
            }
            modules.extend(row);
        }
        Ok(Self { size, modules })
    }

    /// Builds a `size × size` matrix by asking `dark(row, col)` for every module.
    pub fn from_fn(size: usize, mut dark: impl FnMut(usize, usize) -> bool) -> Self {
        let mut modules = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                modules.push(dark(row, col));
            }
        }
        Self { size, modules }
    }

    /// Parses a text pattern where `#` is a dark module and `.` a light one.
    ///
    /// Blank lines and surrounding whitespace are ignored, which keeps test
    /// fixtures readable as indented raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidArgument`] on any other character or when
    /// the pattern is not square.
    pub fn from_pattern(pattern: &str) -> RenderResult<Self> {
        let mut rows = Vec::new();
        for line in pattern.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let row = line
                .chars()
                .map(|c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    other => Err(RenderError::invalid_argument(format!(
                        "unexpected module character {:?}",
                        other
                    ))),
                })
                .collect::<RenderResult<Vec<bool>>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the module at `(row, col)`; anything outside the grid is light.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        self.modules[row * self.size + col]
    }

    /// Number of dark modules in the whole grid.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&dark| dark).count()
    }

    /// Computes which part of the grid gets drawn.
    ///
    /// With quiet zones the whole grid is drawn; without them the
    /// [`QUIET_ZONE`] border is cut from every edge.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidArgument`] if nothing is left to draw.
    pub fn crop(&self, draw_quiet_zones: bool) -> RenderResult<Crop> {
        let offset = if draw_quiet_zones { 0 } else { QUIET_ZONE };
        let count = self.size.saturating_sub(offset * 2);
        if count == 0 {
            return Err(RenderError::invalid_argument(format!(
                "matrix of size {} leaves no drawable modules (quiet zones drawn: {})",
                self.size, draw_quiet_zones
            )));
        }
        Ok(Crop { offset, count })
    }
}

/// The square window of the matrix that ends up in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crop {
    /// Modules skipped on each edge.
    pub offset: usize,
    /// Side length of the drawn window in modules.
    pub count: usize,
}
