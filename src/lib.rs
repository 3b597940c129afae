//! tftpl-check - templatefile variable checker
//!
//! Cross-checks the variables passed to a Terraform `templatefile(...)` call against
//! the `${name}` interpolations of the script it renders, and can drop the unused ones.

pub mod confirm;
pub mod fix;
pub mod template;
pub mod validator;

mod error;

pub use confirm::{Confirm, LinePrompt, Preset, StdinPrompt};
pub use error::CheckError;
pub use validator::{Outcome, Report, Validator, ValidatorConfig};
