//! CLI command definitions and entry point

pub mod binding;
pub mod handlers;
pub mod output;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::settings::Settings;
use crate::target::Target;
use crate::testing::TestingTb;
use crate::tool::Tool;
use handlers::{handle_list, handle_path, handle_show, handle_write};
use output::OutputFormat;

/// golden - inspect and maintain golden test fixtures
#[derive(Parser, Debug)]
#[command(name = "golden", version, about, long_about = None)]
pub struct Cli {
    /// Fixture directory (overrides golden.toml)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the path of a fixture
    Path(FixtureArgs),

    /// Print the contents of a fixture
    Show(FixtureArgs),

    /// Replace a golden fixture with stdin
    Write(WriteArgs),

    /// List fixtures in the fixture directory
    #[command(name = "ls", alias = "list")]
    List(ListArgs),
}

/// Options naming one fixture
#[derive(Args, Debug)]
pub struct FixtureArgs {
    /// Test name; `::` separators become directories
    pub test: String,

    /// Prefix segment (sanitized like in tests)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Extension segment, e.g. `json`
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Which artifact to address
    #[arg(short, long, default_value_t = Target::Golden)]
    pub target: Target,
}

impl FixtureArgs {
    /// Derives the tool addressing this fixture.
    pub fn tool<'t>(&self, settings: &Settings, test: &'t dyn TestingTb) -> Tool<'t> {
        let mut tool = settings.with_test(test).with_target(self.target);
        if let Some(prefix) = &self.prefix {
            tool = tool.with_prefix(prefix);
        }
        if let Some(extension) = &self.extension {
            tool = tool.with_extension(extension);
        }
        tool
    }
}

/// Arguments for the `write` command
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Test name; `::` separators become directories
    pub test: String,

    /// Prefix segment (sanitized like in tests)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Extension segment, e.g. `json`
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Delete the fixture instead of writing stdin
    #[arg(long)]
    pub remove: bool,
}

impl WriteArgs {
    fn fixture(&self) -> FixtureArgs {
        FixtureArgs {
            test: self.test.clone(),
            prefix: self.prefix.clone(),
            extension: self.extension.clone(),
            target: Target::Golden,
        }
    }
}

/// Arguments for the `ls` command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list fixtures of this target
    #[arg(short, long)]
    pub target: Option<Target>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let settings = Settings::from_config(&config, false).with_dir(config.fixtures_dir(cli.dir.as_ref()));

    match &cli.command {
        Command::Path(args) => handle_path(args, &settings),
        Command::Show(args) => handle_show(args, &settings),
        Command::Write(args) => handle_write(args, &settings),
        Command::List(args) => handle_list(args, &settings),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when the CLI is embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
