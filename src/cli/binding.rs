//! Test binding used when the tool runs from the command line.

use crate::naming;
use crate::testing::TestingTb;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reports tool diagnostics on the terminal instead of to a test harness.
///
/// Log lines are tracing events, shown with `-v`. Errors go to stderr.
/// Aborts exit the process with status 1.
#[derive(Debug)]
pub struct CliBinding {
    name: String,
    failed: AtomicBool,
}

impl CliBinding {
    pub fn new(test: &str) -> Self {
        Self {
            name: naming::test_path(test),
            failed: AtomicBool::new(false),
        }
    }

    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

impl TestingTb for CliBinding {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::info!("{args}");
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        eprintln!("error: {args}");
        self.fail();
    }

    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        eprintln!("error: {args}");
        std::process::exit(1)
    }

    fn fail(&self) {
        self.failed.store(true, Ordering::SeqCst);
    }

    fn fail_now(&self) -> ! {
        std::process::exit(1)
    }
}
