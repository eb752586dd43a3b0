mod client;
mod seed;
mod smoke;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(about = "Cookbook CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the server is up and print how many recipes it holds
    Ping {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, env = "COOKBOOK_SERVER", default_value = "http://localhost:3000")]
        server: String,
    },
    /// Add the built-in sample recipes
    Seed {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, env = "COOKBOOK_SERVER", default_value = "http://localhost:3000")]
        server: String,
    },
    /// Create, read, update and delete a throwaway recipe, checking each step
    Smoke {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, env = "COOKBOOK_SERVER", default_value = "http://localhost:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ping { server } => {
            ping(&server).await?;
        }
        Commands::Seed { server } => {
            seed::seed(&server).await?;
        }
        Commands::Smoke { server } => {
            smoke::smoke(&server).await?;
        }
    }

    Ok(())
}

async fn ping(server: &str) -> Result<()> {
    let recipes = client::ApiClient::new(server).list().await?;

    println!("ok: {} recipes", recipes.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_server_default() {
        let cli = Cli::try_parse_from(["cookbook", "smoke"]).unwrap();
        match cli.command {
            Commands::Smoke { server } => assert!(server.starts_with("http://")),
            _ => panic!("expected smoke"),
        }
    }
}
