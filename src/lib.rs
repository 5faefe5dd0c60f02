pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod finder;
pub mod pattern;
pub mod runner;
pub mod scanner;
pub mod sink;
pub mod sources;

pub use crate::config::JobFile;
pub use crate::error::{Result, TextFinderError};
pub use crate::finder::{BuildStatus, FinderConfig, ScanResult, Verdict};
pub use crate::runner::{BuildHandle, MultiFinderRunner};
pub use crate::sink::{BufferSink, Sink, WriterSink};
pub use crate::sources::{GlobEnumerator, SourceEnumerator};
pub use clap::Parser;
