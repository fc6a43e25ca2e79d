//! Outcome of a fixture comparison and the diff shown on mismatch.

use crate::testing::TestingTb;
use pretty_assertions::StrComparison;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// How a missing value is shown in a diff.
pub const ABSENT: &str = "<absent>";

/// The result of comparing an actual value with a fixture.
///
/// Nothing is reported until [`Conclusion::fail`] or
/// [`Conclusion::fail_now`] is called, and both do nothing when the
/// comparison succeeded.
#[must_use = "a conclusion reports nothing until fail or fail_now is called"]
pub struct Conclusion<'t> {
    successful: bool,
    test: &'t dyn TestingTb,
    diff: String,
}

impl<'t> Conclusion<'t> {
    pub(crate) fn new(test: &'t dyn TestingTb, successful: bool, diff: String) -> Self {
        Self {
            successful,
            test,
            diff,
        }
    }

    /// Reports whether the comparison failed.
    pub fn failed(&self) -> bool {
        !self.successful
    }

    /// The rendered difference, empty on success.
    pub fn diff(&self) -> &str {
        &self.diff
    }

    /// Logs the diff and marks the test failed, letting it continue.
    pub fn fail(&self) {
        if self.failed() {
            self.test.log(format_args!("{}", self.diff));
            self.test.fail();
        }
    }

    /// Logs the diff and aborts the test.
    pub fn fail_now(&self) {
        if self.failed() {
            self.test.log(format_args!("{}", self.diff));
            self.test.fail_now();
        }
    }
}

impl fmt::Debug for Conclusion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conclusion")
            .field("successful", &self.successful)
            .field("diff", &self.diff)
            .finish_non_exhaustive()
    }
}

/// Shows a value as text, with absent values replaced by [`ABSENT`].
pub fn render(value: Option<&[u8]>) -> Cow<'_, str> {
    match value {
        Some(bytes) => String::from_utf8_lossy(bytes),
        None => Cow::Borrowed(ABSENT),
    }
}

/// Formats the failure message for a fixture that does not match.
///
/// Present values are quoted; the absent placeholder is not.
pub fn mismatch(path: &Path, want: Option<&[u8]>, got: Option<&[u8]>) -> String {
    let diff = StrComparison::new(&*render(want), &*render(got)).to_string();
    format!(
        "golden: {} does not match\nexpected: {}\nactual  : {}\n\nDiff < expected / actual >:\n{}",
        path.display(),
        quote(want),
        quote(got),
        diff,
    )
}

fn quote(value: Option<&[u8]>) -> String {
    match value {
        Some(bytes) => format!("{:?}", String::from_utf8_lossy(bytes)),
        None => ABSENT.to_string(),
    }
}
