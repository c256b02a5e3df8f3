use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("PUNCHTAPE_LOG", "warn"))
        .init();
    let cli = cli::Cli::parse();
    cli::run(cli)
}
