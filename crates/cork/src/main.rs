//! `cork` -- epic/story/task board CLI.
//!
//! This is the entry point for the corkboard tool. It parses CLI arguments
//! with clap, resolves the runtime context, and dispatches to command
//! handlers.

mod cli;
mod commands;
mod context;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // Install signal handlers for graceful shutdown.
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        std::process::exit(0);
    });

    // Parse CLI arguments
    let cli = Cli::parse();

    // Build runtime context from global args
    let ctx = RuntimeContext::from_global_args(&cli.global);

    // Set up logging based on verbosity
    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("cork=debug,corkboard_import=debug,corkboard_storage=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Dispatch to command handler
    let result = match cli.command {
        Some(Commands::Version) => commands::version::run(&ctx),
        Some(Commands::Init(args)) => commands::init::run(&ctx, &args),
        Some(Commands::Board(args)) => commands::board::run(&ctx, &args),
        Some(Commands::Column(args)) => commands::column::run(&ctx, &args),
        Some(Commands::Item(args)) => commands::item::run(&ctx, &args),
        Some(Commands::Import(args)) => commands::import::run(&ctx, &args),
        Some(Commands::View(args)) => commands::view::run(&ctx, &args),
        Some(Commands::Epics(args)) => commands::epics::run(&ctx, &args),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        // For JSON mode, output error as JSON
        if ctx.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
