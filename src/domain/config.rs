use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::definition::TrailingNewline;

/// Configuration for a preprocessing run.
///
/// Every field has a default, so an empty configuration file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Where the substituted text is written.
    pub output: PathBuf,

    /// Whether the definitions text must end with a newline.
    ///
    /// When `false` (default) the final newline may be omitted and the last
    /// line is still applied.
    pub require_trailing_newline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            require_trailing_newline: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The trailing newline policy for parsing definitions.
    #[must_use]
    pub const fn trailing_newline(&self) -> TrailingNewline {
        TrailingNewline::from_required(self.require_trailing_newline)
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("out.pl")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_output")]
        output: PathBuf,

        #[serde(default)]
        require_trailing_newline: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                output,
                require_trailing_newline,
            } => Self {
                output,
                require_trailing_newline,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            output: config.output,
            require_trailing_newline: config.require_trailing_newline,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\noutput = \"solver.pl\"\nrequire_trailing_newline = true\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.output, PathBuf::from("solver.pl"));
        assert!(config.require_trailing_newline);
        assert_eq!(config.trailing_newline(), TrailingNewline::Required);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nrequire_trailing_newline = \"yes\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.output, PathBuf::from("out.pl"));
        assert_eq!(actual.trailing_newline(), TrailingNewline::Optional);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("precompiler.toml");
        let config = Config {
            output: PathBuf::from("generated.pl"),
            require_trailing_newline: true,
        };

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
