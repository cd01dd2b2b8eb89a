use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser as _;

use packt_free_notifier::config::{Cli, Config};
use packt_free_notifier::{Outcome, errors, logging};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(errors::exit_code(&err))
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("init logging")?;
    tracing::debug!(?cli, "parsed cli");

    let config = Config::from_cli(cli)?;
    match packt_free_notifier::run(&config)? {
        Outcome::DryRun(payload) => {
            let json = serde_json::to_string_pretty(&payload)?;
            println!("{json}");
        }
        Outcome::Posted => println!("Free book posted to {}.", config.channel),
        Outcome::NoDeal | Outcome::Skipped => {}
    }
    Ok(())
}
