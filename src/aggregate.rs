use crate::error::{Result, TextFinderError};
use crate::finder::{FinderConfig, ScanResult};
use crate::pattern::{self, BuildIdPattern};
use crate::scanner;
use crate::sink::Sink;
use crate::sources::SourceEnumerator;
use log::{debug, warn};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Runs one finder over its selected sources and merges the per-source
/// results.
///
/// Fixed order: console first (early-exit scan, no header), then every
/// resolved file in resolution order (full scan, `<path>:` header).
/// Console-before-files only affects identifier precedence, never
/// `found`. A broken configuration (unparseable pattern or selector, or
/// a selector matching zero files) aborts this finder with an error the
/// runner turns into an Unstable build; per-file trouble is recovered
/// locally and scanning continues.
pub fn run_finder(
    config: &FinderConfig,
    console: Option<Box<dyn BufRead>>,
    root: &Path,
    enumerator: &dyn SourceEnumerator,
    sink: &mut dyn Sink,
) -> Result<ScanResult> {
    let mut merged = ScanResult::default();

    if config.also_check_console {
        // Do not mention the pattern we are looking for to avoid false positives
        sink.append("[Text Finder] Scanning console output...");
        let primary = compile_logged(&config.regexp, sink)?;
        let build_id = compile_optional_logged(config.build_id(), sink)?;
        match console {
            Some(reader) => {
                match scanner::scan(reader, &primary, build_id.as_ref(), sink, None, true) {
                    Ok(fresh) => merged = merged.merge(fresh),
                    Err(e) => {
                        sink.append("[Text Finder] Error reading console output -- ignoring");
                        warn!("Console read failed: {e}");
                    }
                }
            }
            None => {
                sink.append("[Text Finder] Error reading console output -- ignoring");
            }
        }
        sink.append(&format!(
            "[Text Finder] Finished looking for pattern '{}' in the console output",
            config.regexp
        ));
    }

    if let Some(selector) = config.file_set() {
        sink.append(&format!(
            "[Text Finder] Looking for pattern '{}' in the files at '{}'",
            config.regexp, selector
        ));
        let files = match enumerator.resolve(root, selector) {
            Ok(files) => files,
            Err(e) => {
                sink.append(&format!(
                    "[Text Finder] Unable to compile file set pattern '{selector}'"
                ));
                return Err(e);
            }
        };
        if files.is_empty() {
            sink.append(&format!("[Text Finder] File set '{selector}' is empty"));
            return Err(TextFinderError::EmptySourceSet {
                selector: selector.to_string(),
            });
        }

        let primary = compile_logged(&config.regexp, sink)?;
        let build_id = compile_optional_logged(config.build_id(), sink)?;

        for path in files {
            if !path.exists() {
                sink.append(&format!(
                    "[Text Finder] Unable to find file '{}'",
                    path.display()
                ));
                continue;
            }
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(e) => {
                    sink.append(&format!(
                        "[Text Finder] Unable to read from file '{}'",
                        path.display()
                    ));
                    debug!("Open failed for {}: {e}", path.display());
                    continue;
                }
            };
            let header = format!("{}:", path.display());
            match scanner::scan(
                BufReader::new(file),
                &primary,
                build_id.as_ref(),
                sink,
                Some(&header),
                false,
            ) {
                Ok(fresh) => merged = merged.merge(fresh),
                Err(e) => {
                    sink.append(&format!(
                        "[Text Finder] Error reading file '{}' -- ignoring",
                        path.display()
                    ));
                    warn!("Read failed for {}: {e}", path.display());
                }
            }
        }
    }

    Ok(merged)
}

fn compile_logged(expr: &str, sink: &mut dyn Sink) -> Result<Regex> {
    pattern::compile(expr).map_err(|e| {
        sink.append(&format!(
            "[Text Finder] Unable to compile regular expression '{expr}'"
        ));
        e
    })
}

fn compile_optional_logged(
    expr: Option<&str>,
    sink: &mut dyn Sink,
) -> Result<Option<BuildIdPattern>> {
    pattern::compile_optional(expr).map_err(|e| {
        sink.append(&format!(
            "[Text Finder] Unable to compile regular expression '{}'",
            expr.unwrap_or_default()
        ));
        e
    })
}
