mod core;
mod release;
mod ui;

use crate::core::error::print_error;
use clap::{Parser, Subcommand};
use release::pipeline::{self, ReleaseOptions};
use release::resolver::VersionStrategy;
use release::version::BumpKind;

/// Cut releases with transactional rollback
#[derive(Parser)]
#[command(name = "shipit")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Release the version already recorded in the manifest
  Cut {
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
  },

  /// Bump the manifest version, then release it
  Bump {
    /// Increment kind: patch, minor, or major (interactive menu if omitted)
    kind: Option<String>,
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  // Exit codes are part of the contract: 0 for success or cancellation,
  // 1 for everything else, including unknown arguments.
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      use clap::error::ErrorKind;
      let _ = err.print();
      match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
        _ => std::process::exit(1),
      }
    }
  };

  let options = match cli.command {
    Commands::Cut { dry_run, yes } => ReleaseOptions {
      strategy: VersionStrategy::Fixed,
      dry_run,
      assume_yes: yes,
    },
    Commands::Bump { kind, dry_run, yes } => {
      let kind = match kind.map(|k| BumpKind::parse(&k)).transpose() {
        Ok(kind) => kind,
        Err(err) => {
          print_error(&err);
          std::process::exit(1);
        }
      };
      ReleaseOptions {
        strategy: VersionStrategy::Bump(kind),
        dry_run,
        assume_yes: yes,
      }
    }
  };

  if let Err(err) = pipeline::run(options) {
    print_error(&err);
    std::process::exit(1);
  }
}
