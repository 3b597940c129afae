mod cli;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use tftpl_check::{Confirm, Preset, StdinPrompt, Validator};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let validator = Validator::new(cli.validator_config());
    tracing::debug!(
        config = %validator.config().config_path.display(),
        script = %validator.config().script_path.display(),
        "starting check"
    );

    let mut confirm: Box<dyn Confirm> = match cli.preset_answer() {
        Some(answer) => Box::new(Preset(answer)),
        None => Box::new(StdinPrompt),
    };

    match validator.run(confirm.as_mut(), &mut io::stdout()) {
        Ok(outcome) => {
            tracing::info!(?outcome, "check complete");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if !err.is_fault() => {
            println!("[ERROR]: {err}");
            Ok(ExitCode::from(err.exit_code()))
        }
        Err(err) => Err(err.into()),
    }
}
