#![deny(missing_docs)]

//! # Routedoc CLI
//!
//! Command Line Interface for generating OpenAPI documents from route groups.
//!
//! Supported Commands:
//! - `generate`: Route group files -> OpenAPI 3.0 document.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod generate;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Route definitions to OpenAPI documents")]
struct Cli {
    /// Log level used when `RUST_LOG` is unset.
    #[clap(long, global = true, env = "ROUTEDOC_LOG", default_value = "info")]
    log_level: String,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Builds the OpenAPI document for every route group under a directory.
    Generate(generate::GenerateArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match &cli.command {
        Commands::Generate(args) => {
            if let Err(err) = generate::execute(args) {
                tracing::error!(%err, "generation failed");
                return Err(err);
            }
        }
    }

    Ok(())
}
