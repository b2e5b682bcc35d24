use anyhow::Result;
use clap::Parser;
use xftp::{cli::Cli, config::Config, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_cli(&cli)?;

    let default_level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("Target: {}@{} ({})", cli.username, config.connection.address, config.protocol);

    match run(config) {
        Ok(_) => {
            println!("\n✅ Done\n");
        }
        Err(e) => {
            eprintln!("\n❌ Failed: {}\n", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
