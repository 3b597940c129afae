use std::path::PathBuf;

use clap::Parser;

use tftpl_check::validator::{DEFAULT_CONFIG_PATH, DEFAULT_SCRIPT_PATH, ValidatorConfig};

/// Checks that every variable handed to `templatefile(...)` is used by the script.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Terraform file holding the templatefile call
    #[arg(long, env = "TFTPL_CHECK_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Script rendered by the templatefile call
    #[arg(long, env = "TFTPL_CHECK_SCRIPT", default_value = DEFAULT_SCRIPT_PATH)]
    pub script: PathBuf,

    /// Remove unused variables without asking
    #[arg(short = 'y', long, conflicts_with = "no")]
    pub yes: bool,

    /// Report unused variables without asking and leave the file alone
    #[arg(long)]
    pub no: bool,
}

impl Cli {
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            config_path: self.config.clone(),
            script_path: self.script.clone(),
        }
    }

    /// Answer fixed on the command line, if any.
    pub fn preset_answer(&self) -> Option<bool> {
        match (self.yes, self.no) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
