//! Print the OpenAPI document as JSON.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use chirp::doc::ApiDoc;
use clap::Parser;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the chirp OpenAPI document as pretty-printed JSON",
    version
)]
struct CliArgs {
    /// Write to this file instead of standard output.
    #[arg(long = "output", short = 'o', value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::try_parse()?;
    let document = ApiDoc::openapi().to_pretty_json()?;
    match args.output {
        Some(path) => {
            let mut file = File::create(&path)?;
            writeln!(file, "{document}")?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{document}")?;
        }
    }
    Ok(())
}
