//! Property tests for rectangle merging and document composition.

use std::ops::RangeInclusive;

use proptest::prelude::*;
use qirust_svg::{
    Logo, LogoBox, ModuleMatrix, ModuleRect, SizingMode, SvgOptions, SvgRenderer, ViewBox,
};

const PIXELS: f64 = 10.0;

fn matrix_strategy(sizes: RangeInclusive<usize>) -> impl Strategy<Value = ModuleMatrix> {
    sizes.prop_flat_map(|size| {
        proptest::collection::vec(any::<bool>(), size * size)
            .prop_map(move |bits| ModuleMatrix::from_fn(size, |row, col| bits[row * size + col]))
    })
}

fn coverage(size: usize, rects: &[ModuleRect]) -> Vec<u32> {
    let mut covered = vec![0u32; size * size];
    for rect in rects {
        assert!(rect.width > 0 && rect.height > 0, "empty rect {:?}", rect);
        for row in rect.row..rect.row + rect.height {
            for col in rect.col..rect.col + rect.width {
                covered[row * size + col] += 1;
            }
        }
    }
    covered
}

proptest! {
    #[test]
    fn rects_cover_exactly_the_drawable_modules(
        matrix in matrix_strategy(9..=20),
        quiet_zones in any::<bool>(),
        logo_percent in proptest::option::of(0u8..=60),
    ) {
        let crop = matrix.crop(quiet_zones).unwrap();
        let count = crop.count;
        // One module is PIXELS wide in the drawn window.
        let view_box = ViewBox::square(count as f64 * PIXELS);
        let mut options = SvgOptions::default().with_quiet_zones(quiet_zones);
        if let Some(percent) = logo_percent {
            options = options.with_logo(Logo::vector_linked("<svg/>").with_size_percent(percent));
        }
        let logo_box = logo_percent.map(|percent| LogoBox::centered(view_box, percent));

        let rects = SvgRenderer::new(&matrix).module_rectangles(view_box, &options).unwrap();
        let covered = coverage(count, &rects);
        let area: usize = rects.iter().map(ModuleRect::area).sum();
        prop_assert_eq!(area, covered.iter().filter(|&&hits| hits > 0).count());

        for row in 0..count {
            for col in 0..count {
                let blocked = logo_box.map_or(false, |logo_box| {
                    logo_box.blocks(col as f64 * PIXELS, row as f64 * PIXELS, PIXELS)
                });
                let dark = matrix.get(row + crop.offset, col + crop.offset);
                let expected = u32::from(dark && !blocked);
                prop_assert_eq!(covered[row * count + col], expected, "module ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn logo_without_background_fill_keeps_every_rect(
        matrix in matrix_strategy(1..=16),
        percent in 0u8..=100,
    ) {
        let view_box = ViewBox::square(matrix.size() as f64 * PIXELS);
        let renderer = SvgRenderer::new(&matrix);
        let plain = renderer.module_rectangles(view_box, &SvgOptions::default()).unwrap();
        let options = SvgOptions::default().with_logo(
            Logo::vector_linked("<svg/>")
                .with_size_percent(percent)
                .with_fill_background(false),
        );
        prop_assert_eq!(renderer.module_rectangles(view_box, &options).unwrap(), plain);
    }

    #[test]
    fn rendering_is_deterministic(matrix in matrix_strategy(1..=12), percent in 0u8..=40) {
        let options = SvgOptions::default()
            .with_logo(Logo::vector_embedded("<svg><g/></svg>").with_size_percent(percent));
        let renderer = SvgRenderer::new(&matrix);
        let first = renderer.render_in(ViewBox::new(123.4, 98.7), &options).unwrap();
        let second = renderer.render_in(ViewBox::new(123.4, 98.7), &options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cropping_only_shifts_rects(inner in matrix_strategy(1..=12)) {
        let size = inner.size() + 8;
        let framed = ModuleMatrix::from_fn(size, |row, col| {
            row >= 4 && col >= 4 && inner.get(row - 4, col - 4)
        });
        let renderer = SvgRenderer::new(&framed);

        let with_zones = renderer
            .module_rectangles(ViewBox::square(size as f64), &SvgOptions::default())
            .unwrap();
        let cropped = renderer
            .module_rectangles(
                ViewBox::square(inner.size() as f64 * 3.0),
                &SvgOptions::default().with_quiet_zones(false),
            )
            .unwrap();

        let shifted: Vec<ModuleRect> = cropped
            .iter()
            .map(|rect| ModuleRect { col: rect.col + 4, row: rect.row + 4, ..*rect })
            .collect();
        prop_assert_eq!(with_zones, shifted);
    }

    #[test]
    fn sizing_mode_only_changes_the_header(matrix in matrix_strategy(1..=12)) {
        let renderer = SvgRenderer::new(&matrix);
        let view_box = ViewBox::new(64.0, 48.0);
        let by_size = renderer.render_in(view_box, &SvgOptions::default()).unwrap();
        let by_view_box = renderer
            .render_in(
                view_box,
                &SvgOptions::default().with_sizing_mode(SizingMode::ViewBoxAttribute),
            )
            .unwrap();

        let (head_a, body_a) = by_size.split_once('\n').unwrap();
        let (head_b, body_b) = by_view_box.split_once('\n').unwrap();
        prop_assert_eq!(body_a, body_b);
        prop_assert_eq!(
            head_a.replace("width=\"64\" height=\"48\"", "viewBox=\"0 0 64 48\""),
            head_b
        );
    }
}
