//! golden - golden-file testing
//!
//! A golden file holds the expected output of a test, stored next to the
//! test instead of as a literal inside it. The test reads the file, compares
//! it with what the code under test produced, and fails with a diff when they
//! differ. With update mode on (`GOLDEN_UPDATE=1`, or `--update` for custom
//! harnesses) the files are rewritten from the actual values instead, so a
//! behavior change becomes a reviewable diff of the fixtures.
//!
//! Fixtures live under `testdata/` by default and are named
//! `<test>[.<prefix>][.<extension>].<target>`, where the target is `golden`
//! for expected output and `input` for data fed to the test.
//!
//! ```no_run
//! use golden::testing::TestCase;
//!
//! fn render(input: &[u8]) -> Vec<u8> {
//!     input.to_ascii_uppercase()
//! }
//!
//! let t = TestCase::current();
//! golden::run(&t, |input| Ok::<_, String>(render(input.unwrap_or_default())));
//! ```

pub mod cli;
pub mod conclusion;
pub mod config;
pub mod fs;
pub mod json;
pub mod naming;
pub mod settings;
pub mod target;
pub mod testing;
pub mod tool;

pub use conclusion::Conclusion;
pub use settings::Settings;
pub use target::{Target, UnsupportedTarget};
pub use tool::Tool;

use std::fmt;
use std::sync::OnceLock;
use testing::TestingTb;
use thiserror::Error;

static DEFAULTS: OnceLock<anyhow::Result<Settings>> = OnceLock::new();

/// Error returned by [`init`] once the defaults are already in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("golden settings are already initialized")]
pub struct AlreadyInitialized;

/// Installs the process-wide defaults.
///
/// Must run before the first tool is derived; afterwards the defaults are
/// read-only. Without a call to `init`, the defaults are loaded from
/// `golden.toml`, `GOLDEN_UPDATE` and the process arguments on first use.
pub fn init(settings: Settings) -> Result<(), AlreadyInitialized> {
    DEFAULTS.set(Ok(settings)).map_err(|_| AlreadyInitialized)
}

/// Returns the process-wide defaults, loading them on first use.
pub fn settings() -> Result<&'static Settings, &'static anyhow::Error> {
    DEFAULTS.get_or_init(Settings::load).as_ref()
}

/// Derives a tool for `t` from the process-wide defaults.
///
/// Aborts the test if the defaults could not be loaded.
pub fn with_test(t: &dyn TestingTb) -> Tool<'_> {
    match settings() {
        Ok(settings) => settings.with_test(t),
        Err(err) => t.fatal(format_args!("golden: {err:#}")),
    }
}

/// Derives a tool for `t` whose expected value is `want` instead of a file.
pub fn with_want<'t>(t: &'t dyn TestingTb, want: Option<&[u8]>) -> Tool<'t> {
    with_test(t).with_want(want)
}

/// Compares `got` with the test's golden file, aborting the test on mismatch.
pub fn assert(t: &dyn TestingTb, got: impl AsRef<[u8]>) {
    with_test(t).assert(got);
}

/// Compares `got` with the test's golden file without reporting.
pub fn equal(t: &dyn TestingTb, got: impl AsRef<[u8]>) -> Conclusion<'_> {
    with_test(t).equal(got)
}

/// Compares a JSON document with the test's `json` golden file.
pub fn json_eq<'t>(t: &'t dyn TestingTb, got: &str) -> Conclusion<'t> {
    with_test(t).json_eq(got)
}

/// Reads the test's input file.
pub fn read(t: &dyn TestingTb) -> Option<Vec<u8>> {
    with_test(t).with_target(Target::Input).read()
}

/// Feeds the test's input file to `f` and asserts the output.
pub fn run<F, E>(t: &dyn TestingTb, f: F)
where
    F: FnOnce(Option<&[u8]>) -> Result<Vec<u8>, E>,
    E: fmt::Display,
{
    with_test(t).run(f);
}
