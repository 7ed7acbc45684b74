use color_eyre::eyre::{Result, bail};
use knowhow::{cli::Cli, config::Config, site};
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  if !cli.input.is_dir() {
    bail!("Input directory does not exist: {}", cli.input.display());
  }

  let config = Config::from_cli(&cli);
  info!("Generating site from {}...", config.input_dir.display());

  let summary = site::generate(&config)?;

  info!(
    "Generated {} pages and copied {} assets into {}",
    summary.pages,
    summary.assets,
    summary.output_dir.display()
  );
  if let Some(target) = &summary.redirect {
    info!("Site entry point: {target}");
  }

  Ok(())
}
