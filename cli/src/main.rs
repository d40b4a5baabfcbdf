mod progress;

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use asciize::error::EXIT_USAGE;
use asciize::scheduler::band_count;
use asciize::{
    AsciizeConfig, Error, FontFace, ProgressSink, ProgressTally, Rasterizer, ScoreMode, Scheduler,
    load_image,
};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use log::debug;

use progress::StderrProgress;

/// Approximate an image with lines of printable ASCII characters
#[derive(Parser, Debug)]
#[command(name = "asciize", version)]
struct Cli {
    /// Image to convert (PNG, JPEG or WEBP)
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// TrueType/OpenType font to match against (embedded monospace font if unset)
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Font size in points
    #[arg(long, value_name = "N", default_value_t = 12.0)]
    size: f32,

    /// How glyphs are scored against the image
    #[arg(long, value_enum, value_name = "MODE", default_value_t = ScoreArg::Shape)]
    score: ScoreArg,

    /// Print progress to stderr
    #[arg(long)]
    progress: bool,

    /// Trim trailing spaces from each line
    #[arg(long)]
    trim: bool,

    /// Replace spaces with no-break spaces
    #[arg(long)]
    nbsp: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScoreArg {
    /// Match glyph outlines pixel by pixel
    Shape,
    /// Match only average brightness
    Shade,
}

impl From<ScoreArg> for ScoreMode {
    fn from(arg: ScoreArg) -> Self {
        match arg {
            ScoreArg::Shape => ScoreMode::Shape,
            ScoreArg::Shade => ScoreMode::Shade,
        }
    }
}

impl Cli {
    fn config(&self) -> AsciizeConfig {
        AsciizeConfig {
            size: self.size,
            score: self.score.into(),
            trim: self.trim,
            nbsp: self.nbsp,
        }
    }
}

fn main() -> ExitCode {
    // Configure logging
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return usage_error(err),
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("conversion failed: {err:?}");
            eprintln!("{err}");
            if matches!(err, Error::Config(_)) {
                eprintln!("\n{}", Cli::command().render_help());
            }
            exit_code(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> asciize::Result<()> {
    let config = cli.config();
    config.validate()?;
    debug!("{config:?}");

    let face = match &cli.font {
        Some(path) => FontFace::open(path, config.size)?,
        None => FontFace::embedded(config.size)?,
    };
    let image = load_image(&cli.image)?;

    let scheduler = Scheduler::new(&face, &config);
    let buffer = if cli.progress {
        let rows = band_count(image.height(), face.line_height());
        let tally = ProgressTally::new(image.width(), rows);
        let mut reporter = StderrProgress::new(tally, io::stderr());
        let buffer = scheduler.run(&image, Some(&mut reporter as &mut dyn ProgressSink));
        reporter.finish();
        buffer?
    } else {
        scheduler.run(&image, None)?
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    buffer.write_to(&config, &mut out)?;
    Ok(())
}

/// Reports a command-line problem; help and version requests succeed
fn usage_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            let _ = err.print();
            eprintln!("\n{}", Cli::command().render_help());
            exit_code(EXIT_USAGE)
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}
