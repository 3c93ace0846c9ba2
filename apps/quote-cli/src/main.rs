//! # Quote Simulator Console Entry Point
//!
//! Mounts the simulator on a console page and drives it from stdin.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          quote (binary)                                 │
//! │                                                                         │
//! │   stdin lines ──────┐                                                   │
//! │                     ▼                                                   │
//! │              ┌─────────────┐    plan <key>    ┌────────────────┐        │
//! │              │ tokio::     │ ───────────────► │   SignalBus    │        │
//! │              │ select!     │                  │  select-plan   │        │
//! │              │             │ ◄─────────────── │                │        │
//! │              └──────┬──────┘   next_signal()  └────────────────┘        │
//! │                     ▼                                                   │
//! │              ┌─────────────┐                  ┌────────────────┐        │
//! │              │  Simulator  │ ───────────────► │  ConsoleHost   │        │
//! │              └─────────────┘     effects      │  (tracing)     │        │
//! │                                               └────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging, to stderr)
//! 3. Load configuration (file → environment → validation)
//! 4. Mount the simulator and subscribe it to the bus
//! 5. Publish `--plan`, if given, like a pricing card click
//! 6. Read commands until `quit` or end of input

mod commands;
mod console;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quote_runtime::{SignalBus, Simulator, SimulatorConfig};

use commands::{Command, HELP};
use console::ConsoleHost;

#[derive(Parser, Debug)]
#[command(name = "quote", version, about = "Website production quote simulator")]
struct Cli {
    /// Configuration file path (defaults to the platform config directory)
    #[arg(short, long, env = "QUOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Plan to select at startup, as if a pricing card was clicked
    #[arg(short, long)]
    plan: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = SimulatorConfig::load(cli.config.clone()).context("failed to load configuration")?;

    let bus = SignalBus::new(config.bus.capacity);
    let host = Arc::new(ConsoleHost::new());
    let mut simulator = Simulator::mount(&config, host.clone(), &bus);

    if let Some(plan) = &cli.plan {
        bus.publish_plan(plan.clone());
    }

    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(msg) = simulator.next_signal() => {
                if !simulator.handle_signal(&msg) {
                    warn!(plan_key = %msg.plan_key, "Plan not applied");
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };

                match Command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => execute(&mut simulator, &bus, command),
                    Ok(None) => {}
                    Err(e) => eprintln!("{:#}", e),
                }
            }
        }
    }

    if let Some(summary) = host.field_value() {
        info!(summary = %summary, "Final estimate");
    }

    Ok(())
}

/// Runs one console command against the simulator.
fn execute(simulator: &mut Simulator, bus: &SignalBus, command: Command) {
    match command {
        Command::Plan(key) => {
            bus.publish_plan(key);
        }
        Command::Select(key) => {
            if !simulator.select_plan(&key) {
                eprintln!("unknown plan {:?}", key);
            }
        }
        Command::Inc => {
            simulator.increment_pages();
        }
        Command::Dec => {
            simulator.decrement_pages();
        }
        Command::Pages(n) => {
            simulator.set_pages_direct(n);
        }
        Command::Toggle(key) => {
            let selected = simulator.toggle_option(&key);
            if simulator.engine().catalog().find_add_on(&key).is_none() {
                warn!(option = %key, selected, "Option not in catalog, priced at ¥0");
            }
        }
        Command::Show => print_estimate(simulator),
        Command::Contact => {
            simulator.go_contact();
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn print_estimate(simulator: &Simulator) {
    let snapshot = simulator.snapshot();

    for line in &snapshot.breakdown {
        println!("  {:<28} {:>12}", line.label, line.amount().to_string());
    }
    println!("  {:<28} {:>12}", "合計", snapshot.total().to_string());
    println!("{}", snapshot.summary_text);
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quote=trace` - Show trace for quote crates only
/// - Default: INFO, DEBUG for quote crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quote=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
