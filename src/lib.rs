//! Minimal template preprocessing
//!
//! Reads `KEY=VALUE` definitions and replaces every key with its value
//! throughout a template, in the order the definitions are written.

use std::path::Path;

pub mod domain;
pub use domain::{
    substitute, Config, Definition, DefinitionError, Definitions, Substituted, TrailingNewline,
};

/// Reading input files and writing the output file.
pub mod storage;

/// Any error that stops a preprocessing run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The definitions could not be parsed.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// An input or output file could not be accessed.
    #[error(transparent)]
    Storage(#[from] storage::Error),
}

/// Reads and parses a definitions file.
///
/// # Errors
///
/// Returns [`Error::Storage`] if the file cannot be read, or
/// [`Error::Definition`] if its contents are malformed under `policy`.
pub fn load_definitions(path: &Path, policy: TrailingNewline) -> Result<Definitions, Error> {
    let text = storage::read_text(path)?;
    let definitions = Definitions::parse(&text, policy)?;
    tracing::info!(
        "Loaded {} definition(s) from {}",
        definitions.len(),
        path.display()
    );
    Ok(definitions)
}
