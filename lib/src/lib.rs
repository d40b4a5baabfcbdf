//! Asciize - approximate images with printable ASCII glyphs
//!
//! Each horizontal band of the image, one font line tall, is turned into a
//! line of text by greedily picking, at every pen position, the printable
//! character whose rendered glyph best matches the pixels underneath it.
//! Bands are converted concurrently and reassembled in order.
//!
//! # Example
//! ```no_run
//! use asciize::{AsciizeConfig, FontFace, convert, load_image};
//!
//! let image = load_image("photo.png").unwrap();
//! let config = AsciizeConfig::default();
//! let face = FontFace::embedded(config.size).unwrap();
//! for line in convert(&image, &face, &config, None).unwrap() {
//!     println!("{line}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod fixed;
pub mod font;
pub mod line;
pub mod output;
pub mod progress;
pub mod scheduler;
pub mod score;
pub mod source;

// Re-export main types for convenience
pub use config::{AsciizeConfig, ScoreMode};
pub use error::{Error, Result};
pub use fixed::Fixed;
pub use font::{FontFace, Rasterizer};
pub use output::OutputBuffer;
pub use progress::{ProgressSink, ProgressTally};
pub use scheduler::{Scheduler, convert};
pub use source::load_image;
