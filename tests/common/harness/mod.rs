//! Test harness for CLI integration tests.
//!
//! Provides isolated fixture directories and CLI assertion helpers using
//! `assert_cmd`.

mod command;
mod env;

#[allow(unused_imports)]
pub use command::GoldenCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
