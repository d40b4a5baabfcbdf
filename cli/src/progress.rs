use std::io::Write;

use asciize::{Fixed, ProgressSink, ProgressTally};

/// Prints a running percentage on one terminal line
pub struct StderrProgress<W: Write> {
    tally: ProgressTally,
    out: W,
}

impl<W: Write> StderrProgress<W> {
    pub fn new(tally: ProgressTally, out: W) -> Self {
        Self { tally, out }
    }

    /// Ends the progress line if anything was printed
    pub fn finish(mut self) {
        if self.tally.done() > 0 {
            let _ = writeln!(self.out);
        }
    }
}

impl<W: Write> ProgressSink for StderrProgress<W> {
    fn advance(&mut self, delta: Fixed) {
        self.tally.advance(delta);
        // Progress is best effort; a closed stderr must not stop the conversion
        let _ = write!(self.out, "\rProgress: {:.2}%", self.tally.percent());
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prints_running_percentage() {
        let mut buf = Vec::new();
        {
            let mut progress = StderrProgress::new(ProgressTally::new(4, 1), &mut buf);
            progress.advance(Fixed::from_px(1));
            progress.advance(Fixed::from_px(3));
            progress.finish();
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "\rProgress: 25.00%\rProgress: 100.00%\n");
    }

    #[test]
    fn test_no_newline_without_progress() {
        let mut buf = Vec::new();
        StderrProgress::new(ProgressTally::new(4, 1), &mut buf).finish();
        assert!(buf.is_empty());
    }
}
