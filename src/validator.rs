use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::confirm::Confirm;
use crate::error::CheckError;
use crate::fix;
use crate::template;

pub const DEFAULT_CONFIG_PATH: &str = "main.tf";
pub const DEFAULT_SCRIPT_PATH: &str = "userdata.sh";

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    pub config_path: PathBuf,
    pub script_path: PathBuf,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            script_path: PathBuf::from(DEFAULT_SCRIPT_PATH),
        }
    }
}

/// Declared `templatefile` variables and the ones the script never uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub declared: BTreeSet<String>,
    pub unused: Vec<String>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.unused.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AllUsed,
    Declined { unused: Vec<String> },
    Fixed { removed: Vec<String> },
}

pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Runs the whole check: existence, report, prompt and, on consent, the rewrite.
    ///
    /// Console lines go to `out`. Missing files and a missing `templatefile`
    /// block come back as errors for the caller to print.
    pub fn run<C, W>(&self, confirm: &mut C, out: &mut W) -> Result<Outcome, CheckError>
    where
        C: Confirm + ?Sized,
        W: Write + ?Sized,
    {
        let config_path = &self.config.config_path;
        let script_path = &self.config.script_path;

        if !config_path.exists() {
            return Err(CheckError::ConfigNotFound {
                path: config_path.clone(),
            });
        }
        if !script_path.exists() {
            return Err(CheckError::ScriptNotFound {
                path: script_path.clone(),
            });
        }

        let config_text = read(config_path)?;
        let report = self.check(&config_text, &read(script_path)?)?;

        let config_name = file_name(config_path);
        let script_name = file_name(script_path);

        emit(
            out,
            format_args!(
                "Variables passed to {script_name}: {}",
                join(report.declared.iter())
            ),
        )?;

        if report.is_clean() {
            emit(
                out,
                format_args!("[INFO]: All variables are correctly used in {script_name}"),
            )?;
            return Ok(Outcome::AllUsed);
        }

        let unused = join(report.unused.iter());
        tracing::warn!(count = report.unused.len(), variables = %unused, "unused variables");
        emit(
            out,
            format_args!(
                "[ERROR]: The following variables are passed to {script_name} but are NOT used: {unused}"
            ),
        )?;
        out.flush().map_err(CheckError::Console)?;

        let prompt = format!(
            "Would you like me to automatically remove these unused variables from {config_name}? (yes/no): "
        );
        if !confirm.confirm(&prompt).map_err(CheckError::Console)? {
            emit(out, format_args!("[INFO]: No changes were made."))?;
            return Ok(Outcome::Declined {
                unused: report.unused,
            });
        }

        let fixed = fix::remove_variables(&config_text, &report.unused);
        fix::write_config(config_path, &fixed)?;

        emit(
            out,
            format_args!("[INFO]: Unused variables {unused} have been removed from {config_name}."),
        )?;
        Ok(Outcome::Fixed {
            removed: report.unused,
        })
    }

    /// Pure part of the run: extracts declared names and finds the unused ones.
    pub fn check(&self, config_text: &str, script_text: &str) -> Result<Report, CheckError> {
        let block = template::find_template_block(config_text).ok_or_else(|| {
            CheckError::NoTemplateBlock {
                path: self.config.config_path.clone(),
            }
        })?;

        let declared = block.declared_variables();
        let unused = template::unused_variables(&declared, script_text);
        tracing::debug!(
            declared = declared.len(),
            unused = unused.len(),
            "templatefile variables checked"
        );

        Ok(Report { declared, unused })
    }
}

fn read(path: &Path) -> Result<String, CheckError> {
    let text = fs::read_to_string(path).map_err(|source| CheckError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded");
    Ok(text)
}

/// Report lines name files the way the operator knows them, without directories.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn emit<W: Write + ?Sized>(out: &mut W, line: std::fmt::Arguments<'_>) -> Result<(), CheckError> {
    writeln!(out, "{line}").map_err(CheckError::Console)
}

fn join<'a>(names: impl Iterator<Item = &'a String>) -> String {
    names.map(String::as_str).collect::<Vec<_>>().join(", ")
}
