// cohcheck: coherence-invariant checker for cache snapshot dumps

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cohcheck::config::{CheckMode, OutputFormat, Protocol, VerifyConfig};
use cohcheck::report::{render_json, render_text};
use cohcheck::ui::App;
use cohcheck::{verify_file, Verification, VerifyError};

/// Exit status when at least one invariant is violated
const EXIT_VIOLATION: u8 = 1;
/// Exit status for usage, I/O and format errors
const EXIT_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "cohcheck", version, about)]
struct Args {
    /// Simulator output containing the CACHE CONTENT section
    dump: PathBuf,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Stop at the first violation instead of reporting all of them
    #[arg(long)]
    fail_fast: bool,

    /// Protocol whose invariant table is applied
    #[arg(long, value_enum, default_value_t = Protocol::Mesi)]
    protocol: Protocol,

    /// Browse the result in an interactive terminal viewer
    #[arg(long)]
    tui: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> VerifyConfig {
        VerifyConfig {
            mode: if self.fail_fast {
                CheckMode::FailFast
            } else {
                CheckMode::Exhaustive
            },
            protocol: self.protocol,
            format: self.format,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.config();
    debug!(?config, dump = %args.dump.display(), "starting verification");

    let verification = match verify_file(&args.dump, &config) {
        Ok(verification) => verification,
        Err(err) => {
            report_error(&err);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let shown = if args.tui {
        run_tui(verification.clone())
    } else {
        print_report(&verification, config.format)
    };
    if let Err(err) = shown {
        eprintln!("Error: {:#}", err);
        return ExitCode::from(EXIT_ERROR);
    }

    if verification.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_VIOLATION)
    }
}

fn report_error(err: &VerifyError) {
    match err {
        VerifyError::Io { source, .. } => eprintln!("Error: {}: {}", err, source),
        VerifyError::Parse(parse) => eprintln!("Error: {}", parse),
    }
}

fn print_report(verification: &Verification, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(verification)),
        OutputFormat::Json => {
            let json = render_json(verification).context("failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_tui(verification: Verification) -> anyhow::Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut terminal = setup_or_restore(enter_terminal, || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    })?;

    let mut app = App::new(verification);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal viewer failed")
}

fn enter_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal")
}

/// Run `setup`, calling `restore` to undo partial terminal state if it fails
fn setup_or_restore<T>(
    setup: impl FnOnce() -> anyhow::Result<T>,
    restore: impl FnOnce(),
) -> anyhow::Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(err) => {
            restore();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_is_restored() {
        let restored = Cell::new(false);
        let res: anyhow::Result<()> = setup_or_restore(
            || Err(anyhow::anyhow!("no terminal")),
            || restored.set(true),
        );
        assert!(res.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_is_kept() {
        let restored = Cell::new(false);
        let res = setup_or_restore(|| Ok(7), || restored.set(true));
        assert_eq!(res.unwrap(), 7);
        assert!(!restored.get());
    }
}
