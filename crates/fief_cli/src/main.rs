//! Turn-based strategy match driver.
//!
//! This binary plays one side of a match over a line protocol. Commands
//! for the opponent arrive on stdin, the controlled player's commands are
//! written to stdout, and diagnostics (the result word, logs and the
//! optional board view) go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Play a match against commands piped on stdin
//! cargo run -p fief_cli
//!
//! # Watch the board while playing
//! cargo run -p fief_cli -- --show-board
//! ```
//!
//! The process exit code carries the result: 0 won, 1 draw, 2 lost,
//! 42 input error.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fief_cli::driver::{Session, SessionConfig};

#[derive(Parser)]
#[command(name = "fief")]
#[command(about = "Line-protocol driver for a turn-based strategy match")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the board's top-left corner after every applied command
    #[arg(long)]
    show_board: bool,
}

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr; stdout carries nothing but commands. The
    // quiet default keeps stderr down to the result word so callers can
    // read it programmatically.
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let config = SessionConfig {
        show_board: cli.show_board,
    };
    let code = Session::new(
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        std::io::stderr().lock(),
        config,
    )
    .run();
    std::process::exit(code);
}
