//! Command handlers.

use anyhow::{Context, Result, bail};
use std::io::{Read, Write};

use super::binding::CliBinding;
use super::output::{FixtureListing, Output, OutputFormat};
use super::{FixtureArgs, ListArgs, WriteArgs};
use crate::fs::{FixtureFile, scan_fixtures};
use crate::settings::Settings;

pub fn handle_path(args: &FixtureArgs, settings: &Settings) -> Result<()> {
    let binding = CliBinding::new(&args.test);
    let tool = args.tool(settings, &binding);
    println!("{}", tool.path().display());
    Ok(())
}

pub fn handle_show(args: &FixtureArgs, settings: &Settings) -> Result<()> {
    let binding = CliBinding::new(&args.test);
    let tool = args.tool(settings, &binding);

    let Some(bytes) = tool.read() else {
        bail!("fixture not found: {}", tool.path().display());
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}

pub fn handle_write(args: &WriteArgs, settings: &Settings) -> Result<()> {
    let settings = settings.clone().with_update(true);
    let binding = CliBinding::new(&args.test);
    let tool = args.fixture().tool(&settings, &binding);

    if args.remove {
        tool.update_option(None);
    } else {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("failed to read fixture from stdin")?;
        tool.update(&data);
    }

    if binding.failed() {
        bail!("failed to write {}", tool.path().display());
    }
    println!("{}", tool.path().display());
    Ok(())
}

pub fn handle_list(args: &ListArgs, settings: &Settings) -> Result<()> {
    let dir = settings.dir();
    let mut fixtures: Vec<FixtureFile> = if dir.exists() {
        scan_fixtures(dir).with_context(|| format!("failed to scan {}", dir.display()))?
    } else {
        Vec::new()
    };

    if let Some(target) = args.target {
        fixtures.retain(|f| f.target == target);
    }

    match args.format {
        OutputFormat::Human => {
            if fixtures.is_empty() {
                println!("No fixtures found.");
            } else {
                println!("{:<8}  {}", "TARGET", "FIXTURE");
                for fixture in &fixtures {
                    println!("{:<8}  {}", fixture.target, fixture.stem);
                }
                println!();
                println!("{} fixture(s)", fixtures.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<FixtureListing> = fixtures.iter().map(FixtureListing::from).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            for fixture in &fixtures {
                println!("{}", dir.join(&fixture.path).display());
            }
        }
    }

    Ok(())
}
