use std::io::Write;

/// Receives one human-readable line per entry processed by a long operation.
pub trait ProgressSink {
    fn line(&mut self, line: &str);
}

/// Discards progress.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn line(&mut self, _line: &str) {}
}

impl ProgressSink for Vec<String> {
    fn line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Writes each line to an `io::Write`, e.g. stdout.
pub struct WriteProgress<W: Write>(pub W);

impl<W: Write> ProgressSink for WriteProgress<W> {
    fn line(&mut self, line: &str) {
        // Progress is advisory; a closed pipe must not abort the operation.
        let _ = writeln!(self.0, "{line}");
    }
}

impl<P: ProgressSink + ?Sized> ProgressSink for &mut P {
    fn line(&mut self, line: &str) {
        (**self).line(line);
    }
}
