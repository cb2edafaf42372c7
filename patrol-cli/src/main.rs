//! Patrol CLI — run the pattern scanner against files and directories.

mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Patrol: heuristic scanner for code smells and security anti-patterns
#[derive(Parser, Debug)]
#[command(name = "patrol", version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Scan a file or directory and report issues
    Scan(commands::ScanArgs),
    /// List the built-in rules
    Rules {
        /// Only show rules applicable to this language
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Scan(args) => commands::scan(args).await,
        Commands::Rules { language } => commands::rules(language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
