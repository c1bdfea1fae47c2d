use clap::Parser;
use lesson_planner::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Generate(args) => cli::generate::run(args).await,
        Command::Draft(args) => cli::draft::run(args),
        Command::Token(args) => cli::token::run(args),
    }
}
