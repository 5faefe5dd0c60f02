use std::fs;
use std::io::{self, BufRead, Cursor};
use tempfile::tempdir;
use text_finder::{
    BufferSink, BuildHandle, BuildStatus, FinderConfig, GlobEnumerator, MultiFinderRunner,
};

/// Build stand-in: status and display name in memory, console from a
/// fixed string.
#[derive(Default)]
struct TestBuild {
    console: String,
    status: Option<BuildStatus>,
    display_name: Option<String>,
}

impl TestBuild {
    fn with_console(console: &str) -> Self {
        Self {
            console: console.to_string(),
            ..Self::default()
        }
    }
}

impl BuildHandle for TestBuild {
    fn set_display_name(&mut self, name: &str) {
        self.display_name = Some(name.to_string());
    }

    fn override_status(&mut self, status: BuildStatus) {
        self.status = Some(status);
    }

    fn open_console_reader(&self) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(Cursor::new(self.console.clone().into_bytes())))
    }
}

#[test]
fn file_match_with_succeed_flag_drives_success() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    fs::write(&path, "foobar\n").unwrap();
    let mut finder = FinderConfig::new("foobar");
    finder.file_set = Some("*.txt".into());
    finder.succeed_if_found = true;

    let mut build = TestBuild::default();
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![finder]).run(&mut build, dir.path(), &GlobEnumerator, &mut sink);

    assert_eq!(build.status, Some(BuildStatus::Success));
    assert!(sink.contains(&format!("{}:", path.display())));
    assert!(sink.lines().iter().any(|l| l == "foobar"));
}

#[test]
fn console_match_with_no_flags_defaults_to_failure() {
    let mut finder = FinderConfig::new("foobar");
    finder.also_check_console = true;

    let mut build = TestBuild::with_console("some noise\nfoobar\nmore noise\n");
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![finder]).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );

    assert_eq!(build.status, Some(BuildStatus::Failure));
    assert!(sink.contains("[Text Finder] Scanning console output..."));
    assert!(
        sink.contains("[Text Finder] Finished looking for pattern 'foobar' in the console output")
    );
}

#[test]
fn extracted_identifier_renames_the_build_alongside_the_status_decision() {
    let mut finder = FinderConfig::new("foobar");
    finder.build_id = Some("^future name: ".into());
    finder.also_check_console = true;
    finder.unstable_if_found = true;

    let mut build = TestBuild::with_console("future name: superId\nfoobar\n");
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![finder]).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );

    assert_eq!(build.display_name.as_deref(), Some("superId"));
    assert_eq!(build.status, Some(BuildStatus::Unstable));
}

#[test]
fn identifier_applies_even_when_the_primary_pattern_never_matches() {
    let mut finder = FinderConfig::new("no such text anywhere");
    finder.build_id = Some("^future name: ".into());
    finder.also_check_console = true;

    let mut build = TestBuild::with_console("future name: superId\nall clean\n");
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![finder]).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );

    assert_eq!(build.display_name.as_deref(), Some("superId"));
    assert_eq!(build.status, None);
}

#[test]
fn last_matching_finder_wins_not_the_worst() {
    let console_finder = |flags: fn(&mut FinderConfig)| {
        let mut finder = FinderConfig::new("foobar");
        finder.also_check_console = true;
        flags(&mut finder);
        finder
    };
    let finders = vec![
        console_finder(|_| {}),
        console_finder(|f| f.unstable_if_found = true),
        console_finder(|f| f.not_built_if_found = true),
    ];

    let mut build = TestBuild::with_console("foobar\n");
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(finders).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );

    assert_eq!(build.status, Some(BuildStatus::NotBuilt));
}

#[test]
fn a_later_finder_can_resurrect_success_after_failure() {
    let mut failing = FinderConfig::new("foobar");
    failing.also_check_console = true;
    let mut succeeding = FinderConfig::new("foobar");
    succeeding.also_check_console = true;
    succeeding.succeed_if_found = true;

    let mut build = TestBuild::with_console("foobar\n");
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![failing, succeeding]).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );

    assert_eq!(build.status, Some(BuildStatus::Success));
}

#[test]
fn invalid_regex_forces_unstable_and_later_finders_still_run() {
    let mut broken = FinderConfig::new("*broken[");
    broken.also_check_console = true;
    let mut healthy = FinderConfig::new("foobar");
    healthy.also_check_console = true;
    healthy.succeed_if_found = true;

    let mut build = TestBuild::with_console("foobar\n");
    let mut sink = BufferSink::new();

    // Broken finder alone: the build is forced Unstable, nothing echoed.
    MultiFinderRunner::new(vec![broken.clone()]).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );
    assert_eq!(build.status, Some(BuildStatus::Unstable));
    assert!(sink.contains("[Text Finder] Unable to compile regular expression '*broken['"));
    assert!(!sink.lines().iter().any(|l| l == "foobar"));

    // Followed by a healthy finder, the override moves on.
    let mut build = TestBuild::with_console("foobar\n");
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![broken, healthy]).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );
    assert_eq!(build.status, Some(BuildStatus::Success));
}

#[test]
fn empty_file_set_forces_unstable() {
    let dir = tempdir().unwrap();
    let mut finder = FinderConfig::new("foobar");
    finder.file_set = Some("*.missing".into());

    let mut build = TestBuild::default();
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![finder]).run(&mut build, dir.path(), &GlobEnumerator, &mut sink);

    assert_eq!(build.status, Some(BuildStatus::Unstable));
    assert!(sink.contains("[Text Finder] File set '*.missing' is empty"));
}

#[test]
fn no_match_leaves_the_build_untouched() {
    let mut finder = FinderConfig::new("foobar");
    finder.also_check_console = true;

    let mut build = TestBuild::with_console("all clean here\n");
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![finder]).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );

    assert_eq!(build.status, None);
    assert_eq!(build.display_name, None);
}

#[test]
fn unselected_sources_make_a_valid_no_op_finder() {
    let finder = FinderConfig::new("foobar");

    let mut build = TestBuild::with_console("foobar\n");
    let mut sink = BufferSink::new();
    MultiFinderRunner::new(vec![finder]).run(
        &mut build,
        tempdir().unwrap().path(),
        &GlobEnumerator,
        &mut sink,
    );

    assert_eq!(build.status, None);
    assert!(sink.lines().is_empty());
}
