//! Glyph rasterization
//!
//! The line renderer only needs two things from a font: its line height and
//! the ability to draw one character at a pen position and report where the
//! pen ends up. [`Rasterizer`] captures that, and [`FontFace`] implements it
//! on top of `ab_glyph`.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::GrayImage;
use log::info;

use crate::error::{Error, Result};
use crate::fixed::Fixed;

/// DejaVu Sans Mono, used when no font file is given
pub const DEFAULT_FONT: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Canvas intensity where nothing has been drawn
pub const BACKGROUND: u8 = 255;

/// Outcome of drawing one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Pen position after the character's advance
    pub pen: Fixed,
    /// Pixel columns the outline touched, if it drew anything
    pub ink: Option<Range<i32>>,
}

/// Something that can draw single characters onto a grayscale canvas
///
/// Implementations are shared by every row task, so they must be `Sync` and
/// must not keep per-call state.
pub trait Rasterizer: Sync {
    /// Height of one text line in whole pixels
    fn line_height(&self) -> u32;

    /// Draws `code` dark-on-light with its origin at `pen`, clipped to the canvas
    fn render(&self, code: u8, pen: Fixed, canvas: &mut GrayImage) -> Glyph;
}

/// A scalable font at a fixed point size
#[derive(Clone)]
pub struct FontFace {
    font: FontArc,
    scale: PxScale,
    ascent: f32,
    line_height: u32,
}

impl FontFace {
    /// The embedded default monospace font
    pub fn embedded(size: f32) -> Result<Self> {
        let font = FontArc::try_from_slice(DEFAULT_FONT).map_err(|_| Error::FontParse {
            path: PathBuf::from("<embedded>"),
        })?;
        Self::new(font, size, Path::new("<embedded>"))
    }

    /// Reads a TrueType or OpenType font file
    pub fn open(path: impl AsRef<Path>, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| Error::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontArc::try_from_vec(data).map_err(|_| Error::FontParse {
            path: path.to_path_buf(),
        })?;
        Self::new(font, size, path)
    }

    fn new(font: FontArc, size: f32, origin: &Path) -> Result<Self> {
        // 72 DPI: one point per pixel per em
        let units_per_em = font.units_per_em().ok_or_else(|| Error::FontParse {
            path: origin.to_path_buf(),
        })?;
        let scale = PxScale::from(size * font.height_unscaled() / units_per_em);

        let scaled = font.as_scaled(scale);
        let ascent = scaled.ascent();
        let line_height = (scaled.ascent() - scaled.descent() + scaled.line_gap()).floor();
        if line_height < 1.0 {
            return Err(Error::ZeroLineHeight { size });
        }

        info!(
            "loaded font {} at {}pt: line height {}px, ascent {:.2}px",
            origin.display(),
            size,
            line_height,
            ascent
        );

        Ok(Self {
            font,
            scale,
            ascent,
            line_height: line_height as u32,
        })
    }
}

impl Rasterizer for FontFace {
    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn render(&self, code: u8, pen: Fixed, canvas: &mut GrayImage) -> Glyph {
        let id = self.font.glyph_id(code as char);
        let advance = Fixed::from_f32(self.font.as_scaled(self.scale).h_advance(id));
        let glyph = id.with_scale_and_position(self.scale, point(pen.to_f32(), self.ascent));

        let Some(outlined) = self.font.outline_glyph(glyph) else {
            return Glyph {
                pen: pen + advance,
                ink: None,
            };
        };

        let bounds = outlined.px_bounds();
        let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);
        outlined.draw(|gx, gy, coverage| {
            let x = left + gx as i32;
            let y = top + gy as i32;
            if x < 0 || y < 0 || x >= width || y >= height {
                return;
            }
            // Black source composited over whatever is already there
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            let keep = 1.0 - coverage.clamp(0.0, 1.0);
            pixel.0[0] = (pixel.0[0] as f32 * keep).round() as u8;
        });

        Glyph {
            pen: pen + advance,
            ink: Some(left..bounds.max.x.ceil() as i32),
        }
    }
}
