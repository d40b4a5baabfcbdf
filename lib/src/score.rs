//! Glyph scoring
//!
//! A candidate is scored over the pixel columns its advance covers, from the
//! pen's floor through the ceiling of the post-render pen, clipped to the
//! row's right edge. Lower is better.

use image::GrayImage;

use crate::config::ScoreMode;
use crate::fixed::Fixed;

/// Dissimilarity between `glyph` and `target` over the span `start..end`
///
/// Both images must have the same dimensions. The raw difference is divided
/// by the inclusive pixel width of the span, so wide and narrow glyphs are
/// compared per column rather than in total.
///
/// # Arguments
/// * `mode` - Shape (absolute per-pixel) or Shade (signed total) comparison
/// * `target` - Source pixels for the row
/// * `glyph` - Scratch canvas holding only the candidate glyph
/// * `start` - Pen position the glyph was drawn at
/// * `end` - Pen position after the glyph's advance
pub fn score(
    mode: ScoreMode,
    target: &GrayImage,
    glyph: &GrayImage,
    start: Fixed,
    end: Fixed,
) -> u64 {
    debug_assert_eq!(target.dimensions(), glyph.dimensions());

    let (width, height) = target.dimensions();
    let left = start.floor();
    let right = end.ceil().min(width as i32);
    let span = (right - left + 1).max(1) as i64;

    // Columns past the image edge contribute nothing but still count toward the span
    let columns = left.max(0)..=right.min(width as i32 - 1);

    let total = match mode {
        ScoreMode::Shape => {
            let mut sum: i64 = 0;
            for x in columns {
                for y in 0..height {
                    let delta = target.get_pixel(x as u32, y).0[0] as i64
                        - glyph.get_pixel(x as u32, y).0[0] as i64;
                    sum += delta.abs();
                }
            }
            sum
        }
        ScoreMode::Shade => {
            let mut sum: i64 = 0;
            for x in columns {
                for y in 0..height {
                    sum += target.get_pixel(x as u32, y).0[0] as i64
                        - glyph.get_pixel(x as u32, y).0[0] as i64;
                }
            }
            sum.abs()
        }
    };

    (total / span) as u64
}
