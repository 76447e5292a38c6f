//! Reading the inputs and writing the result.
//!
//! Each file is opened once, read or written in full, and closed before the
//! function returns.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

/// Error returned when an input or output file cannot be accessed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// Any other I/O failure.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    fn new(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Reads a UTF-8 text file in full.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file does not exist, or [`Error::Io`]
/// if it cannot be read or is not valid UTF-8.
pub fn read_text(path: &Path) -> Result<String, Error> {
    let mut file = File::open(path).map_err(|e| Error::new(path, e))?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|e| Error::new(path, e))?;
    tracing::debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Writes `text` to `path`, replacing any existing file.
///
/// Parent directories are created automatically if they don't exist.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written to.
pub fn write_text(path: &Path, text: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::new(parent, e))?;
    }

    let file = File::create(path).map_err(|e| Error::new(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| Error::new(path, e))?;
    tracing::debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
