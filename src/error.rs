use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("'{}' file not found.", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("'{}' file not found.", path.display())]
    ScriptNotFound { path: PathBuf },

    #[error("No templatefile block found in {}", path.display())]
    NoTemplateBlock { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("console I/O failed: {0}")]
    Console(#[source] io::Error),
}

impl CheckError {
    /// Faults are unexpected I/O failures; everything else is a reported
    /// condition with a one-line `[ERROR]:` message.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            CheckError::Read { .. } | CheckError::Write { .. } | CheckError::Console(_)
        )
    }

    pub fn exit_code(&self) -> u8 {
        1
    }
}
