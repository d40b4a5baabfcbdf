use std::panic;
use std::sync::mpsc;
use std::thread;

use image::{GrayImage, imageops};
use log::debug;
use rayon::prelude::*;

use crate::config::AsciizeConfig;
use crate::error::{Error, Result};
use crate::fixed::{Fixed, MAX_PX};
use crate::font::Rasterizer;
use crate::line::LineRenderer;
use crate::output::OutputBuffer;
use crate::progress::ProgressSink;

/// Number of full row bands; a partial band at the bottom is dropped
pub fn band_count(height: u32, line_height: u32) -> usize {
    if line_height == 0 {
        return 0;
    }
    (height / line_height) as usize
}

/// Runs one line renderer per row band and collects the results in order
pub struct Scheduler<'a, R: ?Sized> {
    raster: &'a R,
    config: &'a AsciizeConfig,
}

impl<'a, R: Rasterizer + ?Sized> Scheduler<'a, R> {
    pub fn new(raster: &'a R, config: &'a AsciizeConfig) -> Self {
        Self { raster, config }
    }

    /// Converts every row band of `image`
    ///
    /// Rows are rendered concurrently with no ordering between them. Pen
    /// advances from all rows are merged into one stream that is drained on
    /// the calling thread into `sink`; the stream ends once the last row task
    /// finishes, and only then is the buffer returned.
    ///
    /// # Arguments
    /// * `image` - Grayscale source, shared read-only by every row task
    /// * `sink` - Receives progress deltas, or `None` to skip reporting
    ///
    /// # Errors
    /// The first row error aborts the conversion; no partial buffer is returned.
    pub fn run(
        &self,
        image: &GrayImage,
        mut sink: Option<&mut dyn ProgressSink>,
    ) -> Result<OutputBuffer> {
        let line_height = self.raster.line_height();
        let (width, height) = image.dimensions();
        if width > MAX_PX {
            return Err(Error::ImageTooWide { width, max: MAX_PX });
        }
        let rows = band_count(height, line_height);
        let reporting = sink.is_some();
        let renderer = LineRenderer::new(self.raster, self.config);
        let mut buffer = OutputBuffer::with_rows(rows);

        debug!(
            "scheduling {} rows of {}x{}px ({} mode)",
            rows, width, line_height, self.config.score
        );

        let (tx, rx) = mpsc::channel::<Fixed>();
        let outcome = thread::scope(|s| {
            let rows_job = s.spawn(|| {
                buffer
                    .cells_mut()
                    .par_iter_mut()
                    .enumerate()
                    .try_for_each_with(tx, |tx, (row, cell)| -> Result<()> {
                        let top = row as u32 * line_height;
                        let region =
                            imageops::crop_imm(image, 0, top, width, line_height).to_image();
                        *cell = renderer.render(row, &region, |delta| {
                            if reporting {
                                // The receiver outlives every sender
                                let _ = tx.send(delta);
                            }
                        })?;
                        debug!("row {} done: {} glyphs", row, cell.len());
                        Ok(())
                    })
            });

            // Closes once every row task has dropped its sender
            for delta in rx {
                if let Some(sink) = sink.as_mut() {
                    sink.advance(delta);
                }
            }

            rows_job
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload))
        });

        outcome?;
        Ok(buffer)
    }
}

/// Converts `image` to post-processed text lines in one call
pub fn convert<R: Rasterizer + ?Sized>(
    image: &GrayImage,
    raster: &R,
    config: &AsciizeConfig,
    sink: Option<&mut dyn ProgressSink>,
) -> Result<Vec<String>> {
    let buffer = Scheduler::new(raster, config).run(image, sink)?;
    Ok(buffer.into_lines(config))
}
