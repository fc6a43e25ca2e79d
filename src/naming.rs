//! Fixture file naming: segment sanitization and file name assembly.
//!
//! File names are checked into version control next to the tests that use
//! them, so the layout produced here is a stable contract:
//! `<test>[.<prefix>][.<extension>].<target>`.

use crate::target::Target;
use unicode_general_category::{GeneralCategory, get_general_category};

/// Rewrites a path segment so it contains no whitespace and only printable
/// characters.
///
/// - Whitespace becomes `_`
/// - ASCII control characters become `\a`, `\b` or `\xNN`
/// - Other non-printable characters become `\u{NNNN}`
/// - Everything else is kept
///
/// The output only contains printable characters, so sanitizing twice gives
/// the same result as sanitizing once.
///
/// # Examples
///
/// ```
/// use golden::naming::sanitize;
///
/// assert_eq!(sanitize("a b\tc"), "a_b_c");
/// assert_eq!(sanitize("nul\0byte"), "nul\\x00byte");
/// ```
pub fn sanitize(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c.is_whitespace() {
            result.push('_');
        } else if c.is_ascii_control() {
            match c {
                '\x07' => result.push_str("\\a"),
                '\x08' => result.push_str("\\b"),
                _ => result.push_str(&format!("\\x{:02x}", c as u32)),
            }
        } else if is_printable(c) {
            result.push(c);
        } else {
            result.extend(c.escape_unicode());
        }
    }
    result
}

/// Letters, marks, numbers, punctuation and symbols are printable.
///
/// Separators, controls, format characters, surrogates, private-use and
/// unassigned code points are not.
fn is_printable(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

/// Turns a Rust test path into a fixture path segment.
///
/// Module separators become directory separators, so
/// `parser::tests::empty_input` maps to `parser/tests/empty_input`.
pub fn test_path(name: &str) -> String {
    name.replace("::", "/")
}

/// Builds the file name of a fixture, relative to the fixture directory.
///
/// Empty `prefix` and `extension` segments are left out; the target is
/// always the last segment.
///
/// ```
/// use golden::Target;
/// use golden::naming::file_name;
///
/// assert_eq!(file_name("TestParse", "", "", Target::Golden), "TestParse.golden");
/// assert_eq!(
///     file_name("TestParse", "case_1", "json", Target::Input),
///     "TestParse.case_1.json.input"
/// );
/// ```
pub fn file_name(test: &str, prefix: &str, extension: &str, target: Target) -> String {
    let mut segments = vec![test];
    for segment in [prefix, extension] {
        if !segment.is_empty() {
            segments.push(segment);
        }
    }
    segments.push(target.as_str());
    segments.join(".")
}

/// A fixture file name split into its target and everything before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureName<'a> {
    /// Test name plus optional prefix and extension segments.
    pub stem: &'a str,
    pub target: Target,
}

/// Splits a file name produced by [`file_name`].
///
/// Returns `None` when the last segment is not a target name.
pub fn parse_file_name(name: &str) -> Option<FixtureName<'_>> {
    let (stem, target) = name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let target = target.parse().ok()?;
    Some(FixtureName { stem, target })
}
