use clap::Parser;
use relevance_workbench::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Templates => cli::templates::run(),
        Command::Preview(args) => cli::preview::run(args).await,
        Command::Create(args) => cli::create::run(args).await,
    }
}
