//! Greedy per-row glyph selection
//!
//! Starting at the left edge, every printable character is drawn at the pen,
//! scored against the source pixels it covers, and the best one is committed.
//! The pen moves to that character's advance and the search repeats until the
//! pen reaches the right edge. There is no lookahead or backtracking.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use log::trace;

use crate::config::{AsciizeConfig, ScoreMode};
use crate::error::{Error, Result};
use crate::fixed::{Fixed, MAX_PX};
use crate::font::{BACKGROUND, Glyph, Rasterizer};
use crate::score::score;

/// Candidate character codes, tried in ascending order
pub const PRINTABLE: std::ops::RangeInclusive<u8> = 32..=126;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    Scanning(Fixed),
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    code: u8,
    pen: Fixed,
    score: u64,
}

/// Converts one row band into text
pub struct LineRenderer<'a, R: ?Sized> {
    raster: &'a R,
    mode: ScoreMode,
}

impl<'a, R: Rasterizer + ?Sized> LineRenderer<'a, R> {
    pub fn new(raster: &'a R, config: &AsciizeConfig) -> Self {
        Self {
            raster,
            mode: config.score,
        }
    }

    /// Selects characters left to right until the row is covered
    ///
    /// `progress` receives the pen advance of every commit. A best candidate
    /// that would reach or cross the right edge is not committed; only the
    /// width that was left is reported for it, so the deltas of a row always
    /// add up to its width. A row narrower than its first glyph keeps that
    /// glyph, so no row with pixels comes back empty.
    ///
    /// # Arguments
    /// * `row` - Row index, used in errors and logs
    /// * `region` - Source pixels for this row, one line height tall
    /// * `progress` - Called with each pen advance in 1/64 px
    ///
    /// # Errors
    /// [`Error::Stalled`] if no printable character advances the pen.
    pub fn render(
        &self,
        row: usize,
        region: &GrayImage,
        mut progress: impl FnMut(Fixed),
    ) -> Result<String> {
        let (width, height) = region.dimensions();
        let right = Fixed::checked_from_px(width).ok_or(Error::ImageTooWide {
            width,
            max: MAX_PX,
        })?;
        let mut canvas = GrayImage::from_pixel(width, height, Luma([BACKGROUND]));
        let mut result = String::new();

        let mut state = if right > Fixed::ZERO {
            LineState::Scanning(Fixed::ZERO)
        } else {
            LineState::Done
        };

        while let LineState::Scanning(pen) = state {
            let best = self
                .select(region, &mut canvas, pen)
                .ok_or(Error::Stalled { row, pen })?;

            state = if best.pen >= right {
                if result.is_empty() {
                    result.push(best.code as char);
                }
                progress(right - pen);
                LineState::Done
            } else {
                result.push(best.code as char);
                trace!(
                    "row {}: {:?} at {} (score {})",
                    row, best.code as char, pen, best.score
                );
                progress(best.pen - pen);
                LineState::Scanning(best.pen)
            };
        }

        Ok(result)
    }

    /// Lowest-scoring advancing candidate at `pen`; ties go to the lower code
    fn select(&self, region: &GrayImage, canvas: &mut GrayImage, pen: Fixed) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for code in PRINTABLE {
            let glyph = self.raster.render(code, pen, canvas);

            if glyph.pen > pen {
                let s = score(self.mode, region, canvas, pen, glyph.pen);
                let better = match best {
                    Some(b) => s < b.score,
                    None => true,
                };
                if better {
                    best = Some(Candidate {
                        code,
                        pen: glyph.pen,
                        score: s,
                    });
                }
            }

            erase(canvas, &glyph);
        }

        best
    }
}

/// Restores the columns a glyph drew on to background
fn erase(canvas: &mut GrayImage, glyph: &Glyph) {
    let Some(ink) = &glyph.ink else {
        return;
    };

    let (width, height) = canvas.dimensions();
    let start = ink.start.max(0);
    let end = ink.end.min(width as i32);
    if end <= start || height == 0 {
        return;
    }

    let rect = Rect::at(start, 0).of_size((end - start) as u32, height);
    draw_filled_rect_mut(canvas, rect, Luma([BACKGROUND]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFace;
    use crate::font::testing::BlockFont;

    fn config(score: ScoreMode) -> AsciizeConfig {
        AsciizeConfig {
            score,
            ..Default::default()
        }
    }

    fn render_collecting(
        raster: &dyn Rasterizer,
        score: ScoreMode,
        region: &GrayImage,
    ) -> (Result<String>, Vec<Fixed>) {
        let config = config(score);
        let renderer = LineRenderer::new(raster, &config);
        let mut deltas = Vec::new();
        let result = renderer.render(0, region, |d| deltas.push(d));
        (result, deltas)
    }

    #[test]
    fn test_white_row_selects_spaces() {
        let font = BlockFont::new(4, 8);
        let region = GrayImage::from_pixel(16, 8, Luma([255]));

        for mode in [ScoreMode::Shape, ScoreMode::Shade] {
            let (result, deltas) = render_collecting(&font, mode, &region);
            // The fourth space would end on the edge and is dropped
            assert_eq!(result.unwrap(), "   ");
            assert_eq!(deltas, vec![Fixed::from_px(4); 4]);
        }
    }

    #[test]
    fn test_black_row_selects_full_block() {
        let font = BlockFont::new(4, 8);
        let region = GrayImage::from_pixel(16, 8, Luma([0]));

        let (result, _) = render_collecting(&font, ScoreMode::Shape, &region);
        assert_eq!(result.unwrap(), "~~~");
    }

    #[test]
    fn test_modes_disagree_on_mid_gray() {
        let font = BlockFont::new(4, 8);
        let region = GrayImage::from_pixel(16, 8, Luma([128]));

        let (shape, _) = render_collecting(&font, ScoreMode::Shape, &region);
        let (shade, _) = render_collecting(&font, ScoreMode::Shade, &region);
        let shape = shape.unwrap();
        let shade = shade.unwrap();

        // Shape mode: white is one level closer to 128 than black is
        assert_eq!(shape, "   ");
        // Shade mode: five of eight rows inked balances the covered columns
        assert!(shade.starts_with('['));
        assert_ne!(shape, shade);
    }

    #[test]
    fn test_glyph_crossing_the_edge_is_reported_not_committed() {
        let font = BlockFont::new(4, 8);
        let region = GrayImage::from_pixel(10, 8, Luma([255]));

        // 0 -> 4 and 4 -> 8 commit; 8 -> 12 crosses 10 and only reports 2px
        let (result, deltas) = render_collecting(&font, ScoreMode::Shade, &region);
        assert_eq!(result.unwrap(), "  ");
        assert_eq!(
            deltas,
            vec![Fixed::from_px(4), Fixed::from_px(4), Fixed::from_px(2)]
        );
    }

    #[test]
    fn test_single_pixel_row_terminates() {
        let font = BlockFont::new(4, 8);
        let region = GrayImage::from_pixel(1, 8, Luma([0]));

        // Narrower than the first advance: the one glyph is kept
        let (result, deltas) = render_collecting(&font, ScoreMode::Shape, &region);
        assert_eq!(result.unwrap(), "~");
        assert_eq!(deltas, vec![Fixed::from_px(1)]);
    }

    #[test]
    fn test_row_of_exactly_one_advance_keeps_its_glyph() {
        let font = BlockFont::new(4, 8);
        let region = GrayImage::from_pixel(4, 8, Luma([0]));

        let (result, deltas) = render_collecting(&font, ScoreMode::Shape, &region);
        assert_eq!(result.unwrap(), "~");
        assert_eq!(deltas, vec![Fixed::from_px(4)]);
    }

    #[test]
    fn test_row_fitting_glyphs_exactly_drops_the_last() {
        let font = BlockFont::new(4, 8);
        let region = GrayImage::from_pixel(8, 8, Luma([0]));

        let (result, deltas) = render_collecting(&font, ScoreMode::Shape, &region);
        assert_eq!(result.unwrap(), "~");
        assert_eq!(deltas, vec![Fixed::from_px(4), Fixed::from_px(4)]);
    }

    #[test]
    fn test_single_pixel_row_terminates_with_real_font() {
        let face = FontFace::embedded(12.0).unwrap();
        let region = GrayImage::from_pixel(1, face.line_height(), Luma([90]));

        for mode in [ScoreMode::Shape, ScoreMode::Shade] {
            let (result, deltas) = render_collecting(&face, mode, &region);
            assert_eq!(result.unwrap().len(), 1);
            assert_eq!(deltas.iter().map(|d| d.raw()).sum::<i32>(), 64);
        }
    }

    #[test]
    fn test_zero_width_row_is_empty() {
        let font = BlockFont::new(4, 8);
        let region = GrayImage::new(0, 8);

        let (result, deltas) = render_collecting(&font, ScoreMode::Shape, &region);
        assert_eq!(result.unwrap(), "");
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_row_wider_than_pen_range_is_rejected() {
        let font = BlockFont::new(4, 1);
        let region = GrayImage::new(MAX_PX + 1, 1);

        let (result, deltas) = render_collecting(&font, ScoreMode::Shape, &region);
        assert!(matches!(
            result.unwrap_err(),
            Error::ImageTooWide { width, .. } if width == MAX_PX + 1
        ));
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_no_advancing_glyph_is_an_error() {
        let font = BlockFont::new(0, 8);
        let region = GrayImage::from_pixel(16, 8, Luma([255]));

        let config = config(ScoreMode::Shape);
        let renderer = LineRenderer::new(&font, &config);
        let err = renderer.render(5, &region, |_| {}).unwrap_err();
        match err {
            Error::Stalled { row, pen } => {
                assert_eq!(row, 5);
                assert_eq!(pen, Fixed::ZERO);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_erase_restores_background() {
        let font = BlockFont::new(4, 8);
        let mut canvas = GrayImage::from_pixel(12, 8, Luma([BACKGROUND]));
        let glyph = font.render(b'~', Fixed::from_px(8), &mut canvas);
        assert!(canvas.pixels().any(|p| p.0[0] != BACKGROUND));

        erase(&mut canvas, &glyph);
        assert!(canvas.pixels().all(|p| p.0[0] == BACKGROUND));
    }

    #[test]
    fn test_real_font_row_is_deterministic_and_printable() {
        let face = FontFace::embedded(12.0).unwrap();
        let height = face.line_height();
        let region = GrayImage::from_fn(120, height, |x, y| Luma([((x * 2 + y * 7) % 256) as u8]));

        let (first, deltas) = render_collecting(&face, ScoreMode::Shape, &region);
        let (second, _) = render_collecting(&face, ScoreMode::Shape, &region);
        let first = first.unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second.unwrap());
        assert!(first.bytes().all(|b| PRINTABLE.contains(&b)));
        assert_eq!(deltas.iter().map(|d| d.raw()).sum::<i32>(), 120 * 64);
    }
}
