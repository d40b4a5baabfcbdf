use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fixed::Fixed;

/// Exit status for bad arguments or configuration (sysexits `EX_USAGE`)
pub const EXIT_USAGE: i32 = 64;
/// Exit status for unreadable or undecodable inputs (sysexits `EX_NOINPUT`)
pub const EXIT_RESOURCE: i32 = 66;
/// Exit status for internal failures (sysexits `EX_SOFTWARE`)
pub const EXIT_INTERNAL: i32 = 70;
/// Exit status for failures writing the result (sysexits `EX_IOERR`)
pub const EXIT_IO: i32 = 74;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to open font {}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse font {}", path.display())]
    FontParse { path: PathBuf },

    #[error("font has a zero line height at size {size}")]
    ZeroLineHeight { size: f32 },

    #[error("failed to open image {}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode image {}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image is {width}px wide; rows wider than {max}px are not supported")]
    ImageTooWide { width: u32, max: u32 },

    #[error("no printable glyph advances the pen at {pen} on row {row}")]
    Stalled { row: usize, pen: Fixed },

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for this failure class
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => EXIT_USAGE,
            Error::FontRead { .. }
            | Error::FontParse { .. }
            | Error::ZeroLineHeight { .. }
            | Error::ImageRead { .. }
            | Error::ImageDecode { .. }
            | Error::ImageTooWide { .. } => EXIT_RESOURCE,
            Error::Stalled { .. } => EXIT_INTERNAL,
            Error::Io(_) => EXIT_IO,
        }
    }
}
