//! Removal of unused `name = value` entries and the rewrite of the configuration.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tempfile::NamedTempFile;

use crate::error::CheckError;

// One `key = value` entry: indentation, key, value up to the next comma (quoted
// strings may contain commas and braces), an optional comma and the line break.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[ \t]*\b(\w+)[ \t]*=[ \t]*(?:"[^"\n]*"|[^,"\n}])*[ \t]*,?[ \t]*\n?"#).unwrap()
});

/// Removes the first `name = value` entry for each of `names`.
///
/// The search covers the whole configuration, not only the `templatefile`
/// mapping, so an identical assignment earlier in the file is removed instead.
pub fn remove_variables(config: &str, names: &[String]) -> String {
    let mut text = config.to_string();
    for name in names {
        match remove_first_entry(&text, name) {
            Some(updated) => {
                tracing::debug!(variable = %name, "removed entry");
                text = updated;
            }
            None => tracing::warn!(variable = %name, "no removable entry found"),
        }
    }
    text
}

fn remove_first_entry(text: &str, name: &str) -> Option<String> {
    let range = ENTRY_RE
        .captures_iter(text)
        .find(|caps| &caps[1] == name)?
        .get(0)?
        .range();

    let mut updated = String::with_capacity(text.len() - range.len());
    updated.push_str(&text[..range.start]);
    updated.push_str(&text[range.end..]);
    Some(updated)
}

/// Replaces the file at `path` with `contents` via a sibling temp file and a rename.
pub fn write_config(path: &Path, contents: &str) -> Result<(), CheckError> {
    let write_err = |source| CheckError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "configuration rewritten");
    Ok(())
}
