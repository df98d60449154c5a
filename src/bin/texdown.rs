use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use texdown::{
    host::{convert_active, FileHost},
    ConvertOptions,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "texdown",
    version,
    about = "Convert a Markdown document into a LaTeX source file",
    long_about = "Convert a Markdown document into a LaTeX source file. \
The result is written next to the input, with the extension replaced by `.tex`."
)]
struct Cli {
    /// Markdown document to convert
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let output = convert_active(FileHost::new(cli.input), &ConvertOptions::default())?;
    println!("{}", output.display());
    Ok(())
}
