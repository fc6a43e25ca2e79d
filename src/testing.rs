//! Test bindings: the reporting surface the fixture tool talks to.

use crate::naming;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// The identity and reporting surface of a running test.
///
/// The tool never inspects how a binding reports; it only relies on
/// `fatal` and `fail_now` not returning.
pub trait TestingTb {
    /// Name of the test, used as the first segment of every fixture path.
    fn name(&self) -> String;

    /// Records an informational message.
    fn log(&self, args: fmt::Arguments<'_>);

    /// Reports a failure and lets the test continue.
    fn error(&self, args: fmt::Arguments<'_>);

    /// Reports a failure and aborts the test.
    fn fatal(&self, args: fmt::Arguments<'_>) -> !;

    /// Marks the test as failed and lets it continue.
    fn fail(&self);

    /// Marks the test as failed and aborts it.
    fn fail_now(&self) -> !;
}

/// Binding for tests run by the standard libtest harness.
///
/// Log lines go to stdout, which libtest captures per test. `fatal` and
/// `fail_now` panic. `error` and `fail` only mark the case; the panic is
/// raised when the `TestCase` is dropped, so every non-fatal problem of the
/// test gets reported first.
///
/// # Examples
///
/// ```
/// use golden::testing::{TestCase, TestingTb};
///
/// let t = TestCase::named("parser::tests::empty_input");
/// assert_eq!(t.name(), "parser/tests/empty_input");
/// ```
#[derive(Debug)]
pub struct TestCase {
    name: String,
    failed: AtomicBool,
}

impl TestCase {
    /// Creates a binding named after the current libtest thread.
    ///
    /// libtest names each test thread after the test path, for example
    /// `tool::tests::reads_fixture`. Outside a named thread the name is `main`.
    pub fn current() -> Self {
        let name = std::thread::current()
            .name()
            .unwrap_or("main")
            .to_string();
        Self::named(name)
    }

    /// Creates a binding with an explicit test name.
    ///
    /// Rust path separators (`::`) become directory separators so nested
    /// test modules map onto nested fixture directories.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: naming::test_path(&name.into()),
            failed: AtomicBool::new(false),
        }
    }

    /// Reports whether `error` or `fail` was called.
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

impl TestingTb for TestCase {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::info!(test = %self.name, "{args}");
        println!("{args}");
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(test = %self.name, "{args}");
        println!("{args}");
        self.fail();
    }

    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.failed.store(true, Ordering::SeqCst);
        panic!("{args}");
    }

    fn fail(&self) {
        self.failed.store(true, Ordering::SeqCst);
    }

    fn fail_now(&self) -> ! {
        self.failed.store(true, Ordering::SeqCst);
        panic!("test {} failed", self.name);
    }
}

impl Drop for TestCase {
    fn drop(&mut self) {
        if self.failed() && !std::thread::panicking() {
            panic!("test {} failed", self.name);
        }
    }
}

/// Panic payload raised by [`Recorder`] when a test is aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aborted {
    pub message: String,
}

/// Binding that records everything instead of reporting it.
///
/// Aborts unwind with an [`Aborted`] payload; wrap the code under test in
/// [`Recorder::run`] to turn them back into a value.
///
/// ```
/// use golden::testing::{Recorder, TestingTb};
///
/// let t = Recorder::new("Example");
/// let outcome = Recorder::run(|| t.fatal(format_args!("boom")));
/// assert_eq!(outcome.unwrap_err().message, "boom");
/// assert!(t.failed());
/// ```
#[derive(Debug, Default)]
pub struct Recorder {
    name: String,
    logs: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    failed: AtomicBool,
}

impl Recorder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Runs `f`, returning the abort it raised, if any.
    ///
    /// Panics that did not come from a binding abort are propagated.
    pub fn run<F: FnOnce()>(f: F) -> Result<(), Aborted> {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(()) => Ok(()),
            Err(payload) => match payload.downcast::<Aborted>() {
                Ok(aborted) => Err(*aborted),
                Err(other) => panic::resume_unwind(other),
            },
        }
    }

    /// Messages passed to `log`, in order.
    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Messages passed to `error` and `fatal`, in order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn push_error(&self, message: String) {
        self.errors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
        self.failed.store(true, Ordering::SeqCst);
    }
}

impl TestingTb for Recorder {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        self.logs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(args.to_string());
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.push_error(args.to_string());
    }

    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        let message = args.to_string();
        self.push_error(message.clone());
        panic::panic_any(Aborted { message })
    }

    fn fail(&self) {
        self.failed.store(true, Ordering::SeqCst);
    }

    fn fail_now(&self) -> ! {
        self.failed.store(true, Ordering::SeqCst);
        panic::panic_any(Aborted {
            message: String::new(),
        })
    }
}
