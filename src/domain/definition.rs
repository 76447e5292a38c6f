use std::{fmt, num::NonZeroUsize, str::FromStr};

use non_empty_string::NonEmptyString;

/// How the final newline of a definitions text is treated.
///
/// Splitting a newline-terminated text on `\n` leaves an empty segment after
/// the last line. That segment is always discarded; this policy decides
/// whether its absence is an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingNewline {
    /// The final newline may be omitted. The last line is kept either way.
    #[default]
    Optional,

    /// A non-empty definitions text must end with a newline.
    Required,
}

impl TrailingNewline {
    /// Returns the policy matching a `require_trailing_newline` flag.
    #[must_use]
    pub const fn from_required(required: bool) -> Self {
        if required {
            Self::Required
        } else {
            Self::Optional
        }
    }
}

/// Error returned when a definitions text cannot be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// A line does not contain the `=` delimiter.
    #[error("Malformed definition on line {line}: '{content}' has no '=' delimiter")]
    MissingDelimiter {
        /// 1-based line number.
        line: NonZeroUsize,
        /// The offending line.
        content: String,
    },

    /// A line starts with `=`, so the key is empty.
    #[error("Malformed definition on line {line}: the key before '=' is empty")]
    EmptyKey {
        /// 1-based line number.
        line: NonZeroUsize,
    },

    /// The definitions text does not end with a newline.
    #[error("Definitions must end with a newline")]
    MissingTrailingNewline,
}

/// A single `KEY=VALUE` substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    key: NonEmptyString,
    value: String,
    line: NonZeroUsize,
}

impl Definition {
    /// Parses one `KEY=VALUE` line.
    ///
    /// The line is split on the first `=` only; the value keeps any further
    /// `=` characters.
    fn parse_line(content: &str, line: NonZeroUsize) -> Result<Self, DefinitionError> {
        let (key, value) =
            content
                .split_once('=')
                .ok_or_else(|| DefinitionError::MissingDelimiter {
                    line,
                    content: content.to_string(),
                })?;

        let key =
            NonEmptyString::new(key.to_string()).map_err(|_| DefinitionError::EmptyKey { line })?;

        Ok(Self {
            key,
            value: value.to_string(),
            line,
        })
    }

    /// The literal text to search for.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// The replacement text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The 1-based line the definition was read from.
    #[must_use]
    pub const fn line(&self) -> NonZeroUsize {
        self.line
    }
}

impl FromStr for Definition {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s.strip_suffix('\r').unwrap_or(s), NonZeroUsize::MIN)
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// An ordered list of definitions, applied in the order they were written.
///
/// Keys are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definitions(Vec<Definition>);

impl Definitions {
    /// Parses a newline-separated definitions text.
    ///
    /// Blank lines are skipped and a trailing `\r` is stripped from every
    /// line.
    ///
    /// # Errors
    ///
    /// Returns an error if a line has no `=` or an empty key, or if `policy`
    /// is [`TrailingNewline::Required`] and a non-empty text does not end
    /// with a newline.
    pub fn parse(text: &str, policy: TrailingNewline) -> Result<Self, DefinitionError> {
        let body = match text.strip_suffix('\n') {
            Some(body) => body,
            None if text.is_empty() => text,
            None => match policy {
                TrailingNewline::Optional => text,
                TrailingNewline::Required => return Err(DefinitionError::MissingTrailingNewline),
            },
        };

        if body.is_empty() {
            return Ok(Self::default());
        }

        body.split('\n')
            .enumerate()
            .map(|(index, content)| {
                (
                    content.strip_suffix('\r').unwrap_or(content),
                    NonZeroUsize::MIN.saturating_add(index),
                )
            })
            .filter(|(content, _)| !content.is_empty())
            .map(|(content, line)| Definition::parse_line(content, line))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// The number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the definitions in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
        self.0.iter()
    }
}

impl FromStr for Definitions {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, TrailingNewline::default())
    }
}

impl<'a> IntoIterator for &'a Definitions {
    type Item = &'a Definition;
    type IntoIter = std::slice::Iter<'a, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
