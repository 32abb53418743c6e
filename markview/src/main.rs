use std::{
  fs,
  io::{self, Write},
  path::Path,
};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use markview::{
  api,
  cli::{Cli, Commands},
  export,
  site::Site,
};
use markview_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  // Init must work without a valid configuration
  if let Commands::Init {
    output,
    format,
    force,
  } = &cli.command
  {
    return init_config(output, format, *force);
  }

  let mut config = Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;
  cli.merge_into(&mut config);
  config.validate().wrap_err("Invalid configuration")?;

  match cli.command {
    Commands::Init { .. } => Ok(()),
    Commands::Render { file, json } => render(config, &file, json),
    Commands::List => list(config),
    Commands::Search { query, json } => search(config, &query, json),
    Commands::Export { .. } => {
      let count = export::export_site(&config, &config.output_dir, config.jobs)
        .wrap_err_with(|| {
          format!("Failed to export to {}", config.output_dir.display())
        })?;
      info!("Exported {count} documents");
      Ok(())
    },
    #[cfg(feature = "serve")]
    Commands::Serve { .. } => serve(config),
  }
}

fn init_config(output: &Path, format: &str, force: bool) -> Result<()> {
  // Check if file already exists and that we're not forcing overwrite
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!("Configuration file created successfully.");
  Ok(())
}

fn render(config: Config, file: &str, json: bool) -> Result<()> {
  let site = Site::new(config);
  let document = site
    .render_document(file)
    .wrap_err_with(|| format!("Failed to render {file}"))?;

  let mut stdout = io::stdout().lock();
  if json {
    serde_json::to_writer_pretty(&mut stdout, &document.result)?;
    writeln!(stdout)?;
  } else {
    writeln!(stdout, "{}", document.result.html)?;
  }
  Ok(())
}

fn list(config: Config) -> Result<()> {
  let site = Site::new(config);
  let mut stdout = io::stdout().lock();
  for file in site.documents() {
    writeln!(stdout, "{file}")?;
  }
  Ok(())
}

fn search(config: Config, query: &str, json: bool) -> Result<()> {
  let site = Site::new(config);
  let mut stdout = io::stdout().lock();

  if json {
    serde_json::to_writer_pretty(&mut stdout, &api::search(&site, query))?;
    writeln!(stdout)?;
    return Ok(());
  }

  let results = site.search(query).wrap_err("Search failed")?;
  for file in &results {
    for found in &file.matches {
      writeln!(stdout, "{}:{}: {}", file.file, found.line, found.text)?;
    }
  }
  info!("{} files matched", results.len());
  Ok(())
}

#[cfg(feature = "serve")]
fn serve(config: Config) -> Result<()> {
  let address = config.server.address();
  let site = Site::new(config);

  tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()
    .wrap_err("Failed to start async runtime")?
    .block_on(markview::serve::run_server(site, &address))
    .wrap_err_with(|| format!("Server on {address} failed"))
}
