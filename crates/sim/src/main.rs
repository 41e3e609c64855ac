//! Host adapter for the LAYR emulated card
//!
//! Stands in for the phone's card-emulation framework: feeds APDUs to the
//! applet, prints what comes back, and runs an observer that shows the
//! applet's last-event label as it changes.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use clap::Parser;
use layr_card::{Event, LayrApplet};
use tracing::{info, warn};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod config;
mod poller;
mod session;

use config::Config;
use poller::Poller;
use session::{Input, Session};

#[derive(Parser)]
#[command(version, about = "Simulate an NFC reader talking to the LAYR emulated card")]
struct Cli {
    /// Configuration file (defaults to ./layr.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// AID the applet answers to, in hex (overrides the configuration)
    #[arg(long)]
    aid: Option<String>,

    /// Label poll interval in milliseconds (overrides the configuration)
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// APDU or shortcut to send; may be repeated. Reads stdin when absent
    #[arg(short, long = "apdu", value_name = "HEX")]
    apdus: Vec<String>,

    /// Trace level output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(aid) = cli.aid {
        config.aid = aid;
    }
    if let Some(interval) = cli.poll_interval_ms {
        config.poll_interval_ms = interval;
    }

    let aid = config.aid()?;
    info!(%aid, poll_interval_ms = config.poll_interval_ms, "Starting emulated card");

    let applet = Arc::new(LayrApplet::new(aid));
    let poller = Poller::spawn(
        Arc::clone(applet.events()),
        config.poll_interval(),
        |event: Event| println!("== status: {event}"),
    );

    let mut session = Session::new(Arc::clone(&applet));
    let mut stdout = io::stdout();

    if cli.apdus.is_empty() {
        for line in io::stdin().lock().lines() {
            if !handle_line(&mut session, &line?, &mut stdout)? {
                break;
            }
        }
    } else {
        for line in &cli.apdus {
            if !handle_line(&mut session, line, &mut stdout)? {
                break;
            }
        }
    }
    stdout.flush()?;

    // Give the observer one more sample so the final label is shown
    thread::sleep(config.poll_interval() * 2);
    poller.stop();

    Ok(())
}

fn handle_line<W: Write>(session: &mut Session, line: &str, out: &mut W) -> io::Result<bool> {
    match Input::parse(line) {
        Ok(input) => session.handle(input, out),
        Err(e) => {
            warn!(line, error = %e, "Ignoring malformed input");
            writeln!(out, "!! not a hex APDU: {e}")?;
            Ok(true)
        }
    }
}

fn setup_logging(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, directives.as_deref()))
        .with_writer(io::stderr)
        .with_ansi(true)
        .init();
}

/// `info`, or `trace` when verbose, unless `directives` (the `RUST_LOG`
/// value) name something else
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    let level = if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default())
}
