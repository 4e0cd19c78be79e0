use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use textbook::config;
use textbook::menu::Menu;
use textbook::Textbook;

#[derive(Parser)]
#[command(name = "textbook")]
#[command(about = "Text-based social network over an in-memory user directory", long_about = None)]
struct Args {
    /// Bootstrap CSV: header, then `username,password,friend...` rows
    #[arg(short, long, value_name = "FILE")]
    users: Option<PathBuf>,

    /// Number of data rows to read from the bootstrap file
    #[arg(short, long)]
    rows: Option<usize>,

    /// Posts shown per page before asking to continue
    #[arg(short, long)]
    page_size: Option<usize>,

    /// Print the loaded directory as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long)]
    debug: bool,
}

/// Filter used when `RUST_LOG` is unset. Stderr shares the terminal with the
/// menu, so only warnings show unless `--debug` is given.
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug)?;

    let path = args
        .users
        .unwrap_or_else(|| PathBuf::from(config::users_csv_path()));
    let rows = args.rows.unwrap_or_else(config::bootstrap_rows);
    let page_size = args
        .page_size
        .filter(|n| *n > 0)
        .unwrap_or_else(config::posts_page_size);

    let (mut textbook, report) = Textbook::from_csv_path(&path, rows)
        .with_context(|| format!("could not bootstrap users from {}", path.display()))?;
    info!(path = %path.display(), users = report.users, "directory ready");

    if args.dump {
        let json = serde_json::to_string_pretty(textbook.directory())?;
        println!("{json}");
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = BufWriter::new(io::stdout());
    Menu::new(&mut textbook, stdin.lock(), stdout, page_size).run()?;

    textbook.teardown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_unless_debugging() {
        assert_eq!(default_filter(false), "warn");
        assert_eq!(default_filter(true), "debug");
    }

    #[test]
    fn debug_flag_parses() {
        let args = Args::parse_from(["textbook", "--debug", "--rows", "3"]);
        assert!(args.debug);
        assert_eq!(args.rows, Some(3));
    }
}
