mod commands;
mod core;
mod fragment;
mod release;
mod render;
mod utils;

use clap::Parser;
use crate::core::config::{FileConfig, GenerateConfig, OutputMode, Overrides};
use crate::core::error::{CalensError, CalensResult, print_error};
use std::path::PathBuf;

/// Build a changelog from per-change fragment files
#[derive(Parser)]
#[command(name = "calens")]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Read release directories from DIR [default: changelog]
  #[arg(short, long, value_name = "DIR")]
  input: Option<PathBuf>,

  /// Write the generated changelog to FILE [default: print to stdout]
  #[arg(short, long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Read the template from FILE [default: changelog/CHANGELOG.tmpl]
  #[arg(short, long, value_name = "FILE")]
  template: Option<PathBuf>,

  /// Only include VERSION (repeat or separate multiple versions with commas)
  #[arg(long = "version", value_name = "VERSION", value_delimiter = ',')]
  versions: Vec<String>,

  /// Use this config file instead of searching for calens.toml
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Only validate the fragments, do not render anything
  #[arg(long, conflicts_with = "json")]
  check: bool,

  /// Print the collected releases as JSON instead of rendering the template
  #[arg(long)]
  json: bool,

  /// Show debug logs (RUST_LOG takes precedence)
  #[arg(short, long)]
  verbose: bool,
}

fn get_styles() -> clap::builder::Styles {
  use anstyle::{AnsiColor, Color, Style};

  let accent = |color: AnsiColor| Style::new().fg_color(Some(Color::Ansi(color)));

  clap::builder::Styles::styled()
    .header(accent(AnsiColor::Cyan).bold())
    .usage(accent(AnsiColor::Cyan).bold())
    .literal(accent(AnsiColor::BrightBlue).bold())
    .placeholder(accent(AnsiColor::BrightBlack).italic())
    .valid(accent(AnsiColor::Green))
    .invalid(accent(AnsiColor::Yellow).bold())
    .error(accent(AnsiColor::Red).bold())
}

fn main() {
  let cli = Cli::parse();
  crate::core::telemetry::init_tracing(cli.verbose);

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> CalensResult<()> {
  let workspace_root = std::env::current_dir()
    .map_err(|e| CalensError::message(format!("Failed to get current directory: {}", e)))?;

  let file_config = FileConfig::load_or_default(&workspace_root, cli.config.as_deref())?;

  let mode = if cli.check {
    OutputMode::Check
  } else if cli.json {
    OutputMode::Json
  } else {
    OutputMode::Render
  };

  let config = GenerateConfig::resolve(
    file_config,
    Overrides {
      input: cli.input,
      output: cli.output,
      template: cli.template,
      versions: cli.versions,
    },
    mode,
  );
  tracing::debug!(?config, "resolved configuration");

  commands::run_generate(&config)
}

fn handle_error(err: CalensError) -> ! {
  print_error(&err);
  std::process::exit(1);
}
