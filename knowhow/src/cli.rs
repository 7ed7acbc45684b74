use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};

/// Command line interface for knowhow
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Generate a static knowledge base from a directory of Markdown files"
)]
pub struct Cli {
  /// Markdown source directory
  #[arg(short, long, value_name = "DIR", default_value = DEFAULT_INPUT_DIR)]
  pub input: PathBuf,

  /// Output directory. Deleted and recreated on every run
  #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
  pub output: PathBuf,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
