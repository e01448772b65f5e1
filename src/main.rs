// Copyright 2026 Stayscout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use stayscout::cli;
use stayscout::config::DEFAULT_PORT;

#[derive(Parser)]
#[command(
    name = "stayscout",
    about = "Stayscout — aggregated hotel search across curated travel sites",
    version,
    after_help = "Run 'stayscout <command> --help' for details on each command."
)]
struct Cli {
    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP search API
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Run one aggregated search and print the JSON response
    Search {
        /// Free-text query (destination, hotel name, ...)
        query: String,
        /// Comma-separated source keys (default: all sources)
        #[arg(long)]
        sources: Option<String>,
    },
    /// Check environment readiness (Chromium, port)
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => {
            cli::init_tracing(cli.verbose);
            cli::serve::run(port).await
        }
        Commands::Search { query, sources } => {
            cli::init_tracing(cli.verbose);
            cli::search_cmd::run(&query, sources.as_deref()).await
        }
        Commands::Doctor => cli::doctor::run().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "stayscout", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    result
}
