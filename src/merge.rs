//! Merging dark modules into rectangles.
//!
//! Drawing one shape per module bloats the document, so dark modules are
//! merged in two passes. The horizontal pass records every maximal run of
//! drawable modules at the column it starts in. The vertical pass then stacks
//! runs that start in the same column with the same length in consecutive
//! rows into a single rectangle. The result is not a globally minimal cover,
//! but it is linear in the number of modules and always yields the same
//! rectangles in the same order for the same input.

use crate::logo::LogoBox;
use crate::matrix::{Crop, ModuleMatrix};

/// A rectangle measured in modules, relative to the cropped window.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ModuleRect {
    pub col: usize,
    pub row: usize,
    pub width: usize,
    pub height: usize,
}

impl ModuleRect {
    /// Scales the rectangle into view box units.
    pub fn to_rect(self, pixels_per_module: f64) -> Rect {
        Rect {
            x: self.col as f64 * pixels_per_module,
            y: self.row as f64 * pixels_per_module,
            width: self.width as f64 * pixels_per_module,
            height: self.height as f64 * pixels_per_module,
        }
    }

    #[cfg(test)]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// A rectangle in view box units.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Merges the dark modules inside `crop` into rectangles.
///
/// `exclusion` is the area of a logo that clears its background; modules
/// touching it are treated as light. Rectangles come out in the order their
/// top-left modules are met scanning rows top to bottom, columns left to
/// right.
///
/// # Example
///
/// ```rust
/// use qirust_svg::matrix::ModuleMatrix;
/// use qirust_svg::merge::{merge_modules, ModuleRect};
///
/// let matrix = ModuleMatrix::from_fn(3, |_, _| true);
/// let crop = matrix.crop(true).unwrap();
///
/// let rects = merge_modules(&matrix, crop, 10.0, None);
/// assert_eq!(rects, vec![ModuleRect { col: 0, row: 0, width: 3, height: 3 }]);
/// ```
pub fn merge_modules(
    matrix: &ModuleMatrix,
    crop: Crop,
    pixels_per_module: f64,
    exclusion: Option<&LogoBox>,
) -> Vec<ModuleRect> {
    let runs = horizontal_runs(matrix, crop, pixels_per_module, exclusion);
    merge_vertical(runs, crop.count)
}

/// Flat `count × count` buffer holding, at the first module of every run, the
/// length of that run, and zero everywhere else.
fn horizontal_runs(
    matrix: &ModuleMatrix,
    crop: Crop,
    pixels_per_module: f64,
    exclusion: Option<&LogoBox>,
) -> Vec<usize> {
    let count = crop.count;
    let mut runs = vec![0usize; count * count];
    let mut run_count = 0usize;

    for row in 0..count {
        let y = row as f64 * pixels_per_module;
        let mut start = 0usize;
        let mut len = 0usize;
        for col in 0..count {
            let drawable = matrix.get(row + crop.offset, col + crop.offset)
                && !exclusion.map_or(false, |logo_box| {
                    logo_box.blocks(col as f64 * pixels_per_module, y, pixels_per_module)
                });
            if drawable {
                if len == 0 {
                    start = col;
                }
                len += 1;
            } else if len > 0 {
                runs[row * count + start] = len;
                run_count += 1;
                len = 0;
            }
        }
        if len > 0 {
            runs[row * count + start] = len;
            run_count += 1;
        }
    }

    tracing::trace!(runs = run_count, modules = count * count, "horizontal pass");
    runs
}

fn merge_vertical(mut runs: Vec<usize>, count: usize) -> Vec<ModuleRect> {
    let mut rects = Vec::new();
    for row in 0..count {
        for col in 0..count {
            let width = runs[row * count + col];
            if width == 0 {
                continue;
            }
            let mut height = 1;
            for below in row + 1..count {
                let cell = &mut runs[below * count + col];
                if *cell != width {
                    break;
                }
                // Consumed; never an origin again.
                *cell = 0;
                height += 1;
            }
            rects.push(ModuleRect {
                col,
                row,
                width,
                height,
            });
        }
    }

    tracing::trace!(rects = rects.len(), "vertical pass");
    rects
}
