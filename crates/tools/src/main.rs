use anyhow::Result;
use clap::{Parser, Subcommand};

use plutoken_tools::RootConfig;

#[derive(Parser)]
#[command(name = "plutoken")]
#[command(about = "PluToken CLI for inspecting build and deployment configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration
    Config {
        /// Print as JSON instead of a summary
        #[arg(short, long)]
        json: bool,
    },
    /// Validate the configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { json } => {
            let config = RootConfig::load()?;
            if json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
            Ok(())
        }
        Commands::Check => {
            let config = RootConfig::load()?;
            println!(
                "Configuration OK: solc {}, {} networks",
                config.solidity.version,
                config.networks.len()
            );
            Ok(())
        }
    }
}
