use crate::aggregate;
use crate::finder::{BuildStatus, FinderConfig};
use crate::sink::Sink;
use crate::sources::SourceEnumerator;
use log::{debug, warn};
use std::io::{self, BufRead};
use std::path::Path;

/// Capability surface of the host build the finders mutate.
pub trait BuildHandle {
    /// Renames the build after an extracted identifier.
    fn set_display_name(&mut self, name: &str);

    /// Overrides the current status outright. Non-monotonic by contract:
    /// a later finder may resurrect Success after an earlier Failure.
    fn override_status(&mut self, status: BuildStatus);

    /// Opens a fresh reader over the build's console log.
    fn open_console_reader(&self) -> io::Result<Box<dyn BufRead>>;
}

/// Runs an ordered list of finders against one build, strictly in list
/// order. Each finder that matches applies its status as a direct
/// override, so the final status is whatever the last matching finder
/// decided, not the worst across all of them.
pub struct MultiFinderRunner {
    finders: Vec<FinderConfig>,
}

impl MultiFinderRunner {
    pub fn new(finders: Vec<FinderConfig>) -> Self {
        Self { finders }
    }

    pub fn finders(&self) -> &[FinderConfig] {
        &self.finders
    }

    pub fn run(
        &self,
        build: &mut dyn BuildHandle,
        root: &Path,
        enumerator: &dyn SourceEnumerator,
        sink: &mut dyn Sink,
    ) {
        for finder in &self.finders {
            Self::run_one(finder, build, root, enumerator, sink);
        }
    }

    fn run_one(
        finder: &FinderConfig,
        build: &mut dyn BuildHandle,
        root: &Path,
        enumerator: &dyn SourceEnumerator,
        sink: &mut dyn Sink,
    ) {
        let console = if finder.also_check_console {
            match build.open_console_reader() {
                Ok(reader) => Some(reader),
                Err(e) => {
                    warn!("Unable to open console log: {e}");
                    None
                }
            }
        } else {
            None
        };

        match aggregate::run_finder(finder, console, root, enumerator, sink) {
            Ok(result) => {
                // The identifier renames the build even when no status
                // decision follows.
                if let Some(id) = &result.build_id {
                    build.set_display_name(id);
                }
                if result.found {
                    build.override_status(finder.decide_status());
                }
            }
            Err(e) => {
                // Broken configuration: this finder's contribution is
                // abandoned, the build goes Unstable, later finders still run.
                debug!("Finder for '{}' aborted: {e}", finder.regexp);
                build.override_status(BuildStatus::Unstable);
            }
        }
    }
}
