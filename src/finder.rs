use serde::{Deserialize, Serialize};
use std::fmt;

/// One complete scan job: what to look for, where, and what the build
/// outcome should be when a match turns up.
///
/// Immutable once constructed; the runner owns an ordered list of these.
/// A config with no file set and console scanning off is valid and scans
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Primary pattern; a line matching it marks the source as "found".
    pub regexp: String,

    /// Optional pattern whose first hit yields the future build identifier.
    #[serde(default)]
    pub build_id: Option<String>,

    /// Include glob(s) resolved against the root directory, comma separated.
    #[serde(default)]
    pub file_set: Option<String>,

    /// Also scan the build's console output.
    #[serde(default)]
    pub also_check_console: bool,

    #[serde(default)]
    pub not_built_if_found: bool,

    #[serde(default)]
    pub unstable_if_found: bool,

    #[serde(default)]
    pub succeed_if_found: bool,
}

impl FinderConfig {
    pub fn new(regexp: impl Into<String>) -> Self {
        Self {
            regexp: regexp.into(),
            build_id: None,
            file_set: None,
            also_check_console: false,
            not_built_if_found: false,
            unstable_if_found: false,
            succeed_if_found: false,
        }
    }

    /// File set selector with blank values normalized to absent.
    pub fn file_set(&self) -> Option<&str> {
        self.file_set
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Identifier expression with blank values normalized to absent.
    pub fn build_id(&self) -> Option<&str> {
        self.build_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Status a match should drive the build to, by strict flag priority:
    /// not-built, then unstable, then succeed, else failure.
    pub fn decide_status(&self) -> BuildStatus {
        if self.not_built_if_found {
            BuildStatus::NotBuilt
        } else if self.unstable_if_found {
            BuildStatus::Unstable
        } else if self.succeed_if_found {
            BuildStatus::Success
        } else {
            BuildStatus::Failure
        }
    }
}

/// Outcome of scanning one source, merged across sources per config.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub found: bool,
    pub build_id: Option<String>,
}

impl ScanResult {
    pub fn new(found: bool, build_id: Option<String>) -> Self {
        Self { found, build_id }
    }

    /// Folds a later source's result into this one: `found` is a pure OR,
    /// the identifier from the later-processed source wins when present.
    #[must_use]
    pub fn merge(self, fresh: ScanResult) -> ScanResult {
        ScanResult {
            found: self.found || fresh.found,
            build_id: fresh.build_id.or(self.build_id),
        }
    }
}

/// Final build status a finder can drive the build to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Success,
    Unstable,
    Failure,
    NotBuilt,
}

impl BuildStatus {
    /// Process exit code the CLI reports for this status.
    pub fn exit_code(self) -> i32 {
        match self {
            BuildStatus::Success => 0,
            BuildStatus::Unstable => 1,
            BuildStatus::Failure => 2,
            BuildStatus::NotBuilt => 3,
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "SUCCESS"),
            BuildStatus::Unstable => write!(f, "UNSTABLE"),
            BuildStatus::Failure => write!(f, "FAILURE"),
            BuildStatus::NotBuilt => write!(f, "NOT_BUILT"),
        }
    }
}

/// Final per-finder outcome, consumed immediately to mutate build state.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub status: BuildStatus,
    pub build_id: Option<String>,
}
