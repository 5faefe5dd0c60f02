use std::io::Write;

/// Append-only text sink the scan report is written to, line by line.
///
/// Matched lines, file headers and the `[Text Finder]` notices all go
/// through here; internal diagnostics use the `log` facade instead.
pub trait Sink {
    fn append(&mut self, line: &str);
}

/// Sink backed by any writer, one line per append.
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn append(&mut self, line: &str) {
        if let Err(e) = writeln!(self.inner, "{line}") {
            log::warn!("Failed to write scan report line: {e}");
        }
    }
}

/// In-memory sink for callers that post-process the report, and for tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl Sink for BufferSink {
    fn append(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
