use crate::finder::ScanResult;
use crate::pattern::BuildIdPattern;
use crate::sink::Sink;
use regex::Regex;
use std::io::BufRead;

/// Scans one text stream line by line.
///
/// Reports whether the primary pattern matched at least one line, echoes
/// every matching line to the sink (preceded once by `header` before the
/// first hit), and records the identifier from the first line matching
/// the widened identifier pattern. Later identifier hits within the same
/// scan never overwrite the first one.
///
/// `stop_at_first_match` returns as soon as the first primary hit is
/// seen; this is required for console scanning, where the stream can be
/// unbounded and only existence of a match matters. The stream is
/// dropped, and thereby closed, on every exit path.
pub fn scan<R: BufRead>(
    reader: R,
    primary: &Regex,
    build_id: Option<&BuildIdPattern>,
    sink: &mut dyn Sink,
    header: Option<&str>,
    stop_at_first_match: bool,
) -> std::io::Result<ScanResult> {
    let mut pending_header = header;
    let mut found = false;
    let mut id: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        if let Some(pattern) = build_id {
            if id.is_none() && pattern.matches(&line) {
                sink.append(&format!(
                    "[Text Finder] Found future buildId line: '{line}'"
                ));
                let derived = pattern.derive(&line);
                sink.append(&format!("[Text Finder] Leading to buildId of: '{derived}'"));
                id = Some(derived);
            }
        }
        if primary.is_match(&line) {
            // first hit gets the one-time header
            if let Some(header) = pending_header.take() {
                sink.append(header);
            }
            sink.append(&line);
            found = true;
            if stop_at_first_match {
                return Ok(ScanResult::new(true, id));
            }
        }
    }
    Ok(ScanResult::new(found, id))
}
