//! The fixture tool: path derivation plus the read, compare and update
//! protocol.

use crate::conclusion::{self, Conclusion};
use crate::fs::{FileKind, FileSystem, FsError};
use crate::json;
use crate::naming;
use crate::settings::Settings;
use crate::target::Target;
use crate::testing::TestingTb;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A golden-file helper bound to one test.
///
/// A tool is an immutable value. Every `with_*` method returns a changed
/// copy and leaves the original alone, so one tool can be the starting point
/// for several fixtures of the same test.
///
/// Fixture paths have the form `<dir>/<test>[.<prefix>][.<extension>].<target>`.
/// Absent fixtures and empty fixtures are different things: reading a
/// missing file yields `None`, and comparing `None` with `Some(b"")` fails.
///
/// # Examples
///
/// ```
/// use golden::{Settings, Target};
/// use golden::testing::Recorder;
/// use std::path::PathBuf;
///
/// let t = Recorder::new("TestParse");
/// let tool = Settings::new().with_test(&t).with_prefix("case 1");
///
/// assert_eq!(tool.path(), PathBuf::from("testdata/TestParse.case_1.golden"));
/// assert_eq!(
///     tool.with_target(Target::Input).path(),
///     PathBuf::from("testdata/TestParse.case_1.input"),
/// );
/// ```
#[derive(Clone)]
pub struct Tool<'t> {
    test: &'t dyn TestingTb,
    dir: PathBuf,
    file_mode: u32,
    dir_mode: u32,
    target: Target,
    prefix: String,
    extension: String,
    update: bool,
    // Explicit expected value; when present, no fixture file is read or written.
    want: Option<Vec<u8>>,
    fs: Arc<dyn FileSystem>,
}

impl<'t> Tool<'t> {
    pub(crate) fn new(test: &'t dyn TestingTb, settings: &Settings, target: Target) -> Self {
        Self {
            test,
            dir: settings.dir().to_path_buf(),
            file_mode: settings.file_mode(),
            dir_mode: settings.dir_mode(),
            target,
            prefix: String::new(),
            extension: String::new(),
            update: settings.update_enabled(),
            want: None,
            fs: Arc::clone(settings.fs()),
        }
    }

    // ===========================================
    // Derivation
    // ===========================================

    /// Returns a copy bound to another test.
    pub fn with_test<'a>(&self, test: &'a dyn TestingTb) -> Tool<'a> {
        Tool {
            test,
            dir: self.dir.clone(),
            file_mode: self.file_mode,
            dir_mode: self.dir_mode,
            target: self.target,
            prefix: self.prefix.clone(),
            extension: self.extension.clone(),
            update: self.update,
            want: self.want.clone(),
            fs: Arc::clone(&self.fs),
        }
    }

    /// Returns a copy with a prefix segment, sanitized for use in a file name.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        Self {
            prefix: naming::sanitize(prefix),
            ..self.clone()
        }
    }

    /// Returns a copy addressing another artifact of the test.
    pub fn with_target(&self, target: Target) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }

    /// Returns a copy with an extension segment placed before the target.
    pub fn with_extension(&self, extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
            ..self.clone()
        }
    }

    /// Returns a copy whose expected value is `want` instead of a file.
    ///
    /// `None` goes back to reading fixture files.
    pub fn with_want(&self, want: Option<&[u8]>) -> Self {
        Self {
            want: want.map(<[u8]>::to_vec),
            ..self.clone()
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn update_enabled(&self) -> bool {
        self.update
    }

    /// Path of the fixture this tool addresses.
    pub fn path(&self) -> PathBuf {
        let name = self.test.name();
        self.dir.join(naming::file_name(
            &name,
            &self.prefix,
            &self.extension,
            self.target,
        ))
    }

    // ===========================================
    // Reading
    // ===========================================

    /// Reads the fixture, or a copy of the explicit want value.
    ///
    /// A missing file is logged and yields `None`. Any other error aborts
    /// the test.
    pub fn read(&self) -> Option<Vec<u8>> {
        if let Some(want) = &self.want {
            self.test
                .log(format_args!("golden: read the value from the want field"));
            return Some(want.clone());
        }

        let path = self.path();
        match self.fs.read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) if err.is_not_found() => {
                self.test.log(format_args!(
                    "golden: read nothing since the file is not found: {}",
                    path.display()
                ));
                None
            }
            Err(err) => self.abort(err),
        }
    }

    // ===========================================
    // Comparison
    // ===========================================

    /// Compares `got` with the golden fixture and aborts the test on mismatch.
    ///
    /// In update mode the fixture is rewritten with `got` first.
    pub fn assert(&self, got: impl AsRef<[u8]>) {
        self.assert_option(Some(got.as_ref()));
    }

    /// Like [`Tool::assert`], where `None` means "no output".
    pub fn assert_option(&self, got: Option<&[u8]>) {
        self.equal_option(got).fail_now();
    }

    /// Compares `got` with the golden fixture without reporting anything.
    ///
    /// In update mode the fixture is rewritten with `got` first.
    pub fn equal(&self, got: impl AsRef<[u8]>) -> Conclusion<'t> {
        self.equal_option(Some(got.as_ref()))
    }

    /// Like [`Tool::equal`], where `None` means "no output".
    pub fn equal_option(&self, got: Option<&[u8]>) -> Conclusion<'t> {
        self.update_option(got);

        let golden = self.with_target(Target::Golden);
        let want = golden.read();
        let successful = want.as_deref() == got;
        let diff = if successful {
            String::new()
        } else {
            conclusion::mismatch(&golden.path(), want.as_deref(), got)
        };

        Conclusion::new(self.test, successful, diff)
    }

    /// Compares a JSON document with the `json` golden fixture.
    ///
    /// Both sides are compared as parsed values, so formatting and key order
    /// do not matter. In update mode the fixture is rewritten with the
    /// canonical form of `got`. Malformed JSON aborts the test.
    pub fn json_eq(&self, got: &str) -> Conclusion<'t> {
        let value = match json::parse(got.as_bytes()) {
            Ok(value) => value,
            Err(err) => self.test.fatal(format_args!(
                "golden: data ({got:?}) needs to be valid json\njson parsing error: {err}"
            )),
        };
        let canonical = match json::render(&value) {
            Ok(text) => text,
            Err(err) => self.test.fatal(format_args!("golden: {err}")),
        };

        let tool = self.with_extension("json");
        tool.update_option(Some(canonical.as_bytes()));

        let golden = tool.with_target(Target::Golden);
        let want = golden.read();
        let successful = match want.as_deref().map(json::parse) {
            None => false,
            Some(Ok(stored)) => stored == value,
            Some(Err(err)) => self.test.fatal(format_args!(
                "golden: fixture {} is not valid json: {err}",
                golden.path().display()
            )),
        };
        let diff = if successful {
            String::new()
        } else {
            conclusion::mismatch(&golden.path(), want.as_deref(), Some(canonical.as_bytes()))
        };

        Conclusion::new(self.test, successful, diff)
    }

    /// Reads the input fixture, passes it to `f` and asserts the output
    /// against the golden fixture.
    ///
    /// An error from `f` aborts the test.
    pub fn run<F, E>(&self, f: F)
    where
        F: FnOnce(Option<&[u8]>) -> Result<Vec<u8>, E>,
        E: fmt::Display,
    {
        let input = self.with_target(Target::Input).read();
        match f(input.as_deref()) {
            Ok(got) => self.assert(got),
            Err(err) => self.test.fatal(format_args!("golden: {err}")),
        }
    }

    // ===========================================
    // Updating
    // ===========================================

    /// Rewrites the golden fixture with `got` when update mode is on.
    pub fn update(&self, got: impl AsRef<[u8]>) {
        self.update_option(Some(got.as_ref()));
    }

    /// Rewrites the golden fixture when update mode is on; `None` deletes it.
    ///
    /// Does nothing when update mode is off or an explicit want value is
    /// bound.
    pub fn update_option(&self, got: Option<&[u8]>) {
        if !self.update {
            return;
        }
        if self.want.is_some() {
            debug!(test = %self.test.name(), "explicit want bound, fixture left alone");
            return;
        }

        let golden = self.with_target(Target::Golden);
        let path = golden.path();
        self.test
            .log(format_args!("golden: updating file: {}", path.display()));
        golden.write(&path, got);
    }

    fn write(&self, path: &Path, data: Option<&[u8]>) {
        let Some(bytes) = data else {
            self.remove_stale(path);
            return;
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            self.ensure_dir(parent);
        }
        self.check(self.fs.write(path, bytes, self.file_mode));
    }

    // A missing value is stored as a missing file, never as an empty one.
    fn remove_stale(&self, path: &Path) {
        self.test
            .log(format_args!("golden: nothing to write, removing {}", path.display()));
        match self.fs.stat(path) {
            Ok(FileKind::File) => self.check(self.fs.remove(path)),
            Ok(FileKind::Dir) => self.test.error(format_args!(
                "golden: fixture path is a directory: {}",
                path.display()
            )),
            Err(err) if err.is_not_found() => {}
            Err(err) => self.abort(err),
        }
    }

    /// Creates `dir` and its parents if missing.
    ///
    /// A non-directory at `dir` is reported as a test error without aborting.
    pub fn ensure_dir(&self, dir: &Path) {
        match self.fs.stat(dir) {
            Ok(FileKind::Dir) => {}
            Ok(FileKind::File) => self.test.error(format_args!(
                "golden: test dir is a file: {}",
                dir.display()
            )),
            Err(err) if err.is_not_found() => {
                self.test.log(format_args!(
                    "golden: trying to create a directory: {}",
                    dir.display()
                ));
                self.check(self.fs.create_dir_all(dir, self.dir_mode));
            }
            Err(err) => self.abort(err),
        }
    }

    fn check<T>(&self, result: Result<T, FsError>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => self.abort(err),
        }
    }

    fn abort(&self, err: FsError) -> ! {
        self.test.fatal(format_args!("golden: {err}"))
    }
}

impl fmt::Debug for Tool<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("test", &self.test.name())
            .field("dir", &self.dir)
            .field("target", &self.target)
            .field("prefix", &self.prefix)
            .field("extension", &self.extension)
            .field("update", &self.update)
            .field("want", &self.want.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use crate::testing::Recorder;
    use pretty_assertions::assert_eq;

    // ===========================================
    // Test Helpers
    // ===========================================

    struct Fixture {
        fs: Arc<MemoryFileSystem>,
        settings: Settings,
    }

    impl Fixture {
        fn new(update: bool) -> Self {
            let fs = Arc::new(MemoryFileSystem::new());
            let settings = Settings::new()
                .with_update(update)
                .with_fs(Arc::clone(&fs) as Arc<dyn FileSystem>);
            Self { fs, settings }
        }
    }

    fn bytes(s: &str) -> Option<&[u8]> {
        Some(s.as_bytes())
    }

    // ===========================================
    // Path derivation
    // ===========================================

    #[test]
    fn path_uses_test_name_and_target() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestPath");
        let tool = fx.settings.with_test(&t);

        assert_eq!(tool.path(), PathBuf::from("testdata/TestPath.golden"));
        assert_eq!(
            tool.with_target(Target::Input).path(),
            PathBuf::from("testdata/TestPath.input")
        );
    }

    #[test]
    fn path_includes_prefix_then_extension() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestPath");
        let tool = fx
            .settings
            .with_test(&t)
            .with_extension("json")
            .with_prefix("sub case");

        assert_eq!(
            tool.path(),
            PathBuf::from("testdata/TestPath.sub_case.json.golden")
        );
    }

    #[test]
    fn path_nests_subtest_names() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestTree/level-one/level-two");
        let tool = fx.settings.with_test(&t);

        assert_eq!(
            tool.path(),
            PathBuf::from("testdata/TestTree/level-one/level-two.golden")
        );
    }

    #[test]
    fn path_is_stable_across_calls() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestStable");
        let tool = fx.settings.with_test(&t).with_prefix("p");
        assert_eq!(tool.path(), tool.path());
        assert_eq!(tool.path(), tool.clone().path());
    }

    #[test]
    fn with_prefix_sanitizes_segment() {
        let fx = Fixture::new(false);
        let t = Recorder::new("T");
        let tool = fx.settings.with_test(&t);

        assert_eq!(tool.with_prefix("a b\tc").prefix(), "a_b_c");
        assert_eq!(tool.with_prefix("nul\0").prefix(), "nul\\x00");
    }

    #[test]
    fn derivations_leave_original_untouched() {
        let fx = Fixture::new(false);
        let t = Recorder::new("T");
        let base = fx.settings.with_test(&t);

        let _derived = base
            .with_prefix("p")
            .with_extension("e")
            .with_target(Target::Input)
            .with_want(bytes("w"));

        assert_eq!(base.prefix(), "");
        assert_eq!(base.extension(), "");
        assert_eq!(base.target(), Target::Golden);
        assert_eq!(base.read(), None);
    }

    #[test]
    fn with_test_rebinds_name() {
        let fx = Fixture::new(false);
        let first = Recorder::new("First");
        let second = Recorder::new("Second");

        let tool = fx.settings.with_test(&first).with_prefix("p");
        let rebound = tool.with_test(&second);

        assert_eq!(rebound.path(), PathBuf::from("testdata/Second.p.golden"));
    }

    // ===========================================
    // read()
    // ===========================================

    #[test]
    fn read_returns_fixture_bytes() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestRead.input", b"input data");
        let t = Recorder::new("TestRead");

        let input = fx.settings.with_test(&t).with_target(Target::Input).read();

        assert_eq!(input, Some(b"input data".to_vec()));
    }

    #[test]
    fn read_missing_file_logs_and_returns_none() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestMissing");

        let result = fx.settings.with_test(&t).read();

        assert_eq!(result, None);
        assert!(!t.failed());
        assert_eq!(
            t.logs(),
            vec!["golden: read nothing since the file is not found: testdata/TestMissing.golden"
                .to_string()]
        );
    }

    #[test]
    fn read_empty_file_is_present() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestEmpty.golden", b"");
        let t = Recorder::new("TestEmpty");

        assert_eq!(fx.settings.with_test(&t).read(), Some(Vec::new()));
    }

    #[test]
    fn read_other_errors_abort() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestDenied.golden", b"secret");
        fx.fs.deny("testdata/TestDenied.golden");
        let t = Recorder::new("TestDenied");

        let outcome = Recorder::run(|| {
            fx.settings.with_test(&t).read();
        });

        let aborted = outcome.unwrap_err();
        assert!(aborted.message.starts_with("golden: permission denied"));
    }

    #[test]
    fn read_prefers_explicit_want() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestWant.golden", b"from file");
        let t = Recorder::new("TestWant");

        let tool = fx.settings.with_test(&t).with_want(bytes("explicit"));

        assert_eq!(tool.read(), Some(b"explicit".to_vec()));
        assert_eq!(
            t.logs(),
            vec!["golden: read the value from the want field".to_string()]
        );
    }

    #[test]
    fn with_want_none_reads_files_again() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestWant.golden", b"from file");
        let t = Recorder::new("TestWant");

        let tool = fx
            .settings
            .with_test(&t)
            .with_want(bytes("explicit"))
            .with_want(None);

        assert_eq!(tool.read(), Some(b"from file".to_vec()));
    }

    // ===========================================
    // assert() / equal()
    // ===========================================

    #[test]
    fn assert_without_fixture_fails_with_absent_placeholder() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestFresh");

        let outcome = Recorder::run(|| fx.settings.with_test(&t).assert(b"golden"));

        assert!(outcome.is_err());
        assert!(t.failed());
        let logs = t.logs();
        assert_eq!(
            logs[0],
            "golden: read nothing since the file is not found: testdata/TestFresh.golden"
        );
        assert!(logs[1].contains("expected: <absent>\n"));
        assert!(logs[1].contains("actual  : \"golden\""));
        assert_eq!(fx.fs.mutations(), 0);
    }

    #[test]
    fn assert_in_update_mode_writes_then_passes() {
        let fx = Fixture::new(true);
        let t = Recorder::new("TestFresh");

        let outcome = Recorder::run(|| fx.settings.with_test(&t).assert(b"golden"));

        assert!(outcome.is_ok());
        assert!(!t.failed());
        assert_eq!(
            fx.fs.file("testdata/TestFresh.golden"),
            Some(b"golden".to_vec())
        );
        assert!(fx.fs.is_dir("testdata"));
        assert_eq!(fx.fs.mode("testdata"), Some(0o755));
        assert_eq!(fx.fs.mode("testdata/TestFresh.golden"), Some(0o644));
    }

    #[test]
    fn assert_matching_fixture_passes() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestMatch.golden", b"golden");
        let t = Recorder::new("TestMatch");

        let outcome = Recorder::run(|| fx.settings.with_test(&t).assert(b"golden"));

        assert!(outcome.is_ok());
        assert!(!t.failed());
    }

    #[test]
    fn assert_mismatch_shows_both_values() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestDiff.golden", b"golden");
        let t = Recorder::new("TestDiff");

        let outcome = Recorder::run(|| fx.settings.with_test(&t).assert(b"Z29sZGVu"));

        assert!(outcome.is_err());
        let diff = t.logs().pop().unwrap();
        assert!(diff.contains("testdata/TestDiff.golden does not match"));
        assert!(diff.contains("expected: \"golden\""));
        assert!(diff.contains("actual  : \"Z29sZGVu\""));
    }

    #[test]
    fn equal_distinguishes_absent_from_empty() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestEmpty.golden", b"");
        let t = Recorder::new("TestEmpty");
        let tool = fx.settings.with_test(&t);

        assert!(!tool.equal(b"").failed());
        assert!(tool.equal_option(None).failed());

        let missing = Recorder::new("TestMissing");
        let tool = fx.settings.with_test(&missing);
        assert!(!tool.equal_option(None).failed());
        assert!(tool.equal(b"").failed());
    }

    #[test]
    fn equal_does_not_report_by_itself() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestQuiet");

        let conclusion = fx.settings.with_test(&t).equal(b"anything");

        assert!(conclusion.failed());
        assert!(!t.failed());
        conclusion.fail();
        assert!(t.failed());
    }

    #[test]
    fn assert_compares_golden_even_from_input_target() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestTarget.golden", b"out");
        fx.fs.insert_file("testdata/TestTarget.input", b"in");
        let t = Recorder::new("TestTarget");

        let tool = fx.settings.with_test(&t).with_target(Target::Input);

        assert!(!tool.equal(b"out").failed());
    }

    #[test]
    fn assert_with_explicit_want_never_writes() {
        let fx = Fixture::new(true);
        let t = Recorder::new("TestWant");
        let tool = fx.settings.with_test(&t).with_want(bytes("expected"));

        assert!(!tool.equal(b"expected").failed());
        assert!(tool.equal(b"other").failed());
        assert_eq!(fx.fs.mutations(), 0);
        assert!(fx.fs.paths().is_empty());
    }

    // ===========================================
    // update()
    // ===========================================

    #[test]
    fn update_is_noop_when_disabled() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestOff.golden", b"old");
        let t = Recorder::new("TestOff");
        let tool = fx.settings.with_test(&t);

        tool.update(b"new");
        tool.update_option(None);

        assert_eq!(fx.fs.mutations(), 0);
        assert_eq!(fx.fs.file("testdata/TestOff.golden"), Some(b"old".to_vec()));
        assert!(t.logs().is_empty());
    }

    #[test]
    fn update_round_trips_through_read() {
        let fx = Fixture::new(true);
        let t = Recorder::new("TestRoundTrip");
        let tool = fx.settings.with_test(&t).with_prefix("case");

        tool.update(b"\x00binary\xff");

        assert_eq!(tool.read(), Some(b"\x00binary\xff".to_vec()));
    }

    #[test]
    fn update_none_deletes_existing_fixture() {
        let fx = Fixture::new(true);
        fx.fs.insert_file("testdata/TestNil.golden", b"stale");
        let t = Recorder::new("TestNil");
        let tool = fx.settings.with_test(&t);

        tool.update_option(None);

        assert_eq!(fx.fs.file("testdata/TestNil.golden"), None);
        assert_eq!(tool.read(), None);
    }

    #[test]
    fn update_none_without_fixture_creates_nothing() {
        let fx = Fixture::new(true);
        let t = Recorder::new("TestNil");

        fx.settings.with_test(&t).update_option(None);

        assert!(fx.fs.paths().is_empty());
        assert!(!t.failed());
    }

    #[test]
    fn assert_none_in_update_mode_passes_and_removes_fixture() {
        let fx = Fixture::new(true);
        fx.fs.insert_file("testdata/TestNil.golden", b"stale");
        let t = Recorder::new("TestNil");

        let outcome = Recorder::run(|| fx.settings.with_test(&t).assert_option(None));

        assert!(outcome.is_ok());
        assert_eq!(fx.fs.file("testdata/TestNil.golden"), None);
    }

    #[test]
    fn update_writes_golden_target_only() {
        let fx = Fixture::new(true);
        fx.fs.insert_file("testdata/TestInput.input", b"in");
        let t = Recorder::new("TestInput");

        fx.settings
            .with_test(&t)
            .with_target(Target::Input)
            .update(b"out");

        assert_eq!(fx.fs.file("testdata/TestInput.input"), Some(b"in".to_vec()));
        assert_eq!(fx.fs.file("testdata/TestInput.golden"), Some(b"out".to_vec()));
    }

    #[test]
    fn update_uses_configured_modes() {
        let fs = Arc::new(MemoryFileSystem::new());
        let settings = Settings::new()
            .with_dir("fixtures/deep")
            .with_update(true)
            .with_file_mode(0o600)
            .with_dir_mode(0o700)
            .with_fs(Arc::clone(&fs) as Arc<dyn FileSystem>);
        let t = Recorder::new("TestModes");

        settings.with_test(&t).update(b"x");

        assert_eq!(fs.mode("fixtures"), Some(0o700));
        assert_eq!(fs.mode("fixtures/deep"), Some(0o700));
        assert_eq!(fs.mode("fixtures/deep/TestModes.golden"), Some(0o600));
    }

    #[test]
    fn update_write_failure_aborts() {
        let fx = Fixture::new(true);
        fx.fs.insert_file("testdata/keep", b"");
        fx.fs.deny("testdata/TestDenied.golden");
        let t = Recorder::new("TestDenied");

        let outcome = Recorder::run(|| fx.settings.with_test(&t).update(b"x"));

        assert!(outcome.unwrap_err().message.contains("permission denied"));
    }

    // ===========================================
    // ensure_dir()
    // ===========================================

    #[test]
    fn ensure_dir_creates_missing_directories() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestDir");

        fx.settings.with_test(&t).ensure_dir(Path::new("a/b/c"));

        assert!(fx.fs.is_dir("a/b/c"));
        assert_eq!(
            t.logs(),
            vec!["golden: trying to create a directory: a/b/c".to_string()]
        );
    }

    #[test]
    fn ensure_dir_accepts_existing_directory() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/x.golden", b"");
        let t = Recorder::new("TestDir");

        fx.settings.with_test(&t).ensure_dir(Path::new("testdata"));

        assert_eq!(fx.fs.mutations(), 0);
        assert!(!t.failed());
    }

    #[test]
    fn ensure_dir_reports_file_in_the_way_without_aborting() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata", b"not a directory");
        let t = Recorder::new("TestDir");

        let outcome = Recorder::run(|| fx.settings.with_test(&t).ensure_dir(Path::new("testdata")));

        assert!(outcome.is_ok());
        assert!(t.failed());
        assert_eq!(
            t.errors(),
            vec!["golden: test dir is a file: testdata".to_string()]
        );
    }

    #[test]
    fn update_through_blocked_directory_reports_then_aborts() {
        let fx = Fixture::new(true);
        fx.fs.insert_file("testdata", b"not a directory");
        let t = Recorder::new("TestBlocked");

        let outcome = Recorder::run(|| fx.settings.with_test(&t).update(b"x"));

        assert!(outcome.is_err());
        let errors = t.errors();
        assert_eq!(errors[0], "golden: test dir is a file: testdata");
        assert_eq!(errors.len(), 2);
    }

    // ===========================================
    // run()
    // ===========================================

    #[test]
    fn run_feeds_input_and_asserts_output() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestRun.input", b"abc");
        fx.fs.insert_file("testdata/TestRun.golden", b"ABC");
        let t = Recorder::new("TestRun");

        let outcome = Recorder::run(|| {
            fx.settings.with_test(&t).run(|input| {
                Ok::<_, String>(input.unwrap_or_default().to_ascii_uppercase())
            })
        });

        assert!(outcome.is_ok());
        assert!(!t.failed());
    }

    #[test]
    fn run_passes_none_for_missing_input() {
        let fx = Fixture::new(true);
        let t = Recorder::new("TestRun");
        let mut seen = Some(Vec::new());

        fx.settings.with_test(&t).run(|input| {
            seen = input.map(<[u8]>::to_vec);
            Ok::<_, String>(b"out".to_vec())
        });

        assert_eq!(seen, None);
        assert_eq!(fx.fs.file("testdata/TestRun.golden"), Some(b"out".to_vec()));
    }

    #[test]
    fn run_aborts_on_function_error() {
        let fx = Fixture::new(true);
        let t = Recorder::new("TestRun");

        let outcome = Recorder::run(|| {
            fx.settings
                .with_test(&t)
                .run(|_| Err::<Vec<u8>, _>("decode failed"))
        });

        assert_eq!(outcome.unwrap_err().message, "golden: decode failed");
        assert_eq!(fx.fs.mutations(), 0);
    }

    // ===========================================
    // json_eq()
    // ===========================================

    #[test]
    fn json_eq_ignores_formatting() {
        let fx = Fixture::new(false);
        fx.fs
            .insert_file("testdata/TestJson.json.golden", b"{\"b\": [1, 2], \"a\": null}");
        let t = Recorder::new("TestJson");

        let conclusion = fx.settings.with_test(&t).json_eq(r#"{"a":null,"b":[1,2]}"#);

        assert!(!conclusion.failed(), "{}", conclusion.diff());
    }

    #[test]
    fn json_eq_update_stores_canonical_form() {
        let fx = Fixture::new(true);
        let t = Recorder::new("TestJson");
        let tool = fx.settings.with_test(&t).with_prefix("case");

        let conclusion = tool.json_eq(r#"{"z":1,"a":true}"#);

        assert!(!conclusion.failed());
        assert_eq!(
            fx.fs.file("testdata/TestJson.case.json.golden"),
            Some(b"{\n\t\"a\": true,\n\t\"z\": 1\n}".to_vec())
        );
    }

    #[test]
    fn json_eq_detects_semantic_difference() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestJson.json.golden", b"{\"a\": 1}");
        let t = Recorder::new("TestJson");

        let conclusion = fx.settings.with_test(&t).json_eq(r#"{"a": 2}"#);

        assert!(conclusion.failed());
        assert!(conclusion.diff().contains("TestJson.json.golden"));
    }

    #[test]
    fn json_eq_missing_fixture_fails() {
        let fx = Fixture::new(false);
        let t = Recorder::new("TestJson");

        assert!(fx.settings.with_test(&t).json_eq("{}").failed());
    }

    #[test]
    fn json_eq_malformed_input_aborts() {
        let fx = Fixture::new(true);
        let t = Recorder::new("TestJson");

        let outcome = Recorder::run(|| {
            let _ = fx.settings.with_test(&t).json_eq("{not json");
        });

        let aborted = outcome.unwrap_err();
        assert!(aborted.message.contains("needs to be valid json"));
        assert_eq!(fx.fs.mutations(), 0);
    }

    #[test]
    fn json_eq_malformed_fixture_aborts() {
        let fx = Fixture::new(false);
        fx.fs.insert_file("testdata/TestJson.json.golden", b"{broken");
        let t = Recorder::new("TestJson");

        let outcome = Recorder::run(|| {
            let _ = fx.settings.with_test(&t).json_eq("{}");
        });

        assert!(outcome.unwrap_err().message.contains("is not valid json"));
    }
}
