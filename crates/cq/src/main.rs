//! `cq` -- compile and evaluate CQQL preference queries.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod demo;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

const DEFAULT_LOG_FILTER: &str = "cq=debug,cqql_query=debug,cqql_config=debug";

fn main() {
    let cli = Cli::parse();

    let ctx = RuntimeContext::from_global_args(&cli.global);

    // `RUST_LOG` wins over the built-in filter.
    if ctx.verbose {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Some(Commands::Parse(args)) => commands::parse::run(&ctx, &args),
        Some(Commands::Atoms(args)) => commands::atoms::run(&ctx, &args),
        Some(Commands::Expand(args)) => commands::expand::run(&ctx, &args),
        Some(Commands::Normalize(args)) => commands::normalize::run(&ctx, &args),
        Some(Commands::Explain(args)) => commands::explain::run(&ctx, &args),
        Some(Commands::Rank(args)) => commands::rank::run(&ctx, &args),
        Some(Commands::Check(args)) => commands::check::run(&ctx, &args),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, &args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, &args),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        if ctx.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
                "kind": output::error_kind(&e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {}", output::format_error(&e));
        }
        std::process::exit(1);
    }
}
