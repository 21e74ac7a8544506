//! TFHE Solidity code generator CLI
//!
//! Generates the encrypted-arithmetic Solidity library (`TFHE.sol`,
//! `Impl.sol`), the input verifiers, the payment contract, the event-emitting
//! executor and the sharded test suites from one operator catalog.
//!
//! - **Operator Catalog**: bundled TOML catalog, or `--catalog <file>`
//! - **Deterministic Output**: identical inputs give byte-identical files
//! - **All or Nothing**: files are only written once every stage succeeded
mod config;
mod pipeline;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{GenerateArgs, GenerationConfig};
use pipeline::{generate_all, get_artifact_groups};

/// Main CLI structure using clap for argument parsing
///
/// Running without a subcommand is the same as `generate`.
#[derive(Parser)]
#[command(name = "tfhe-codegen")]
#[command(about = "Generate the TFHE Solidity library, verifiers, payment contract and tests")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Generate every artifact into the output root
    Generate(GenerateArgs),

    /// List catalog operators and artifact groups
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
struct ListArgs {
    /// List catalog operators with their widths and flags
    #[arg(long)]
    operators: bool,

    /// List the registered artifact groups
    #[arg(long)]
    artifacts: bool,

    /// Operator catalog (TOML); defaults to the bundled catalog
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(default_level.parse()?)
                .add_directive("tfhe_codegen=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}

fn list_operators(catalog: Option<PathBuf>) -> anyhow::Result<()> {
    let config = GenerationConfig {
        catalog,
        ..GenerationConfig::with_output(std::path::Path::new("."))
    };
    let catalog = config.load_catalog()?;

    println!("📋 Available operators:");
    for op in catalog.list_operators() {
        let widths = op
            .widths
            .iter()
            .map(|w| w.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let mut flags = Vec::new();
        if op.commutative {
            flags.push("commutative");
        }
        if op.scalar_only {
            flags.push("scalar-only");
        } else if op.scalar {
            flags.push("scalar");
        }
        if !op.promotion.is_none() {
            flags.push("promotion");
        }
        println!(
            "  • {:<6} - {:?} [{widths}] {}",
            op.name,
            op.arity,
            flags.join(" ")
        );
    }
    Ok(())
}

fn list_artifacts() {
    println!("📄 Artifact groups:");
    for group in get_artifact_groups(String::new(), String::new()) {
        println!("  • {:<16} - {}", group.name(), group.description());
    }
}

/// Main entry point for the CLI application
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Generate(cli.generate));

    match command {
        Commands::Generate(args) => {
            init_tracing(args.verbose)?;
            println!("🚀 TFHE Code Generator");
            println!("Generating Solidity library and tests...\n");

            let config = GenerationConfig::from_cli_args(args);
            let summary = generate_all(&config)?;

            println!("\n🎉 Generation complete!");
            println!(
                "📊 {} overloads, {} test contracts, {} test files ({} files written)",
                summary.overloads,
                summary.shards,
                summary.splits,
                summary.written.len()
            );
            println!("📁 Output directory: {}", config.output.display());
        }
        Commands::List(args) => {
            init_tracing(false)?;
            let both = !args.operators && !args.artifacts;
            if args.operators || both {
                list_operators(args.catalog)?;
            }
            if both {
                println!();
            }
            if args.artifacts || both {
                list_artifacts();
            }
        }
    }

    Ok(())
}
