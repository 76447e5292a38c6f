//! The substitution pass.

use super::definition::{Definition, DefinitionError, Definitions, TrailingNewline};

/// The result of applying a set of definitions to a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted<'a> {
    text: String,
    applied: Vec<Applied<'a>>,
}

/// A single definition applied during a substitution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied<'a> {
    /// The definition that was applied.
    pub definition: &'a Definition,

    /// How many occurrences of the key were replaced.
    pub replacements: usize,
}

impl Substituted<'_> {
    /// The substituted text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the result, returning the substituted text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Each definition with its replacement count, in application order.
    #[must_use]
    pub fn applied(&self) -> &[Applied<'_>] {
        &self.applied
    }

    /// The total number of replacements made.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.applied.iter().map(|a| a.replacements).sum()
    }

    /// Definitions whose key never occurred in the working text.
    pub fn unused(&self) -> impl Iterator<Item = &Definition> {
        self.applied
            .iter()
            .filter(|a| a.replacements == 0)
            .map(|a| a.definition)
    }
}

impl Definitions {
    /// Applies every definition, in order, to `template`.
    ///
    /// Each key is replaced literally and globally. Text inserted by one
    /// definition is visible to every later definition, but not to the one
    /// that inserted it.
    #[must_use]
    pub fn apply(&self, template: &str) -> Substituted<'_> {
        let mut text = template.to_string();
        let mut applied = Vec::with_capacity(self.len());

        for definition in self {
            let replacements = text.matches(definition.key()).count();
            if replacements == 0 {
                tracing::info!(
                    "'{}' (line {}) does not occur in the template",
                    definition.key(),
                    definition.line()
                );
            } else {
                tracing::debug!(
                    "Replacing {replacements} occurrence(s) of '{}' with '{}'",
                    definition.key(),
                    definition.value()
                );
                text = text.replace(definition.key(), definition.value());
            }
            applied.push(Applied {
                definition,
                replacements,
            });
        }

        Substituted { text, applied }
    }
}

/// Substitutes every `KEY=VALUE` line of `definitions` into `template`.
///
/// A missing final newline in `definitions` is accepted. Use
/// [`Definitions::parse`] with [`TrailingNewline::Required`] to reject it.
///
/// # Errors
///
/// Returns an error if a definitions line has no `=` or an empty key.
///
/// # Examples
///
/// ```
/// let result = precompiler::substitute("NAME=world\n", "hello NAME").unwrap();
/// assert_eq!(result, "hello world");
/// ```
pub fn substitute(definitions: &str, template: &str) -> Result<String, DefinitionError> {
    let definitions = Definitions::parse(definitions, TrailingNewline::Optional)?;
    Ok(definitions.apply(template).into_text())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn end_to_end() {
        assert_eq!(
            substitute("NAME=world\n", "hello NAME").unwrap(),
            "hello world"
        );
    }

    #[test_case("A=B\nB=C\n", "A", "C"; "later definitions see earlier values")]
    #[test_case("B=C\nA=B\n", "A", "B"; "earlier definitions do not see later values")]
    #[test_case("A=AA\n", "A A", "AA AA"; "inserted text is not rescanned")]
    #[test_case("A=1\nA=2\n", "A", "1"; "repeated key has nothing left to replace")]
    #[test_case("K=V1=V2\n", "K", "V1=V2"; "value keeps later delimiters")]
    #[test_case("x=y\n", "X x", "X y"; "case sensitive")]
    #[test_case("ab=_\n", "aabab", "a__"; "non-overlapping left to right")]
    #[test_case("GONE=\n", "keep GONE this", "keep  this"; "empty value deletes")]
    fn substitution_semantics(definitions: &str, template: &str, expected: &str) {
        assert_eq!(substitute(definitions, template).unwrap(), expected);
    }

    #[test]
    fn unmatched_keys_leave_template_unchanged() {
        let template = "nothing to see here\n";
        assert_eq!(substitute("ABSENT=x\nMISSING=\n", template).unwrap(), template);
    }

    #[test]
    fn no_definitions_leave_template_unchanged() {
        assert_eq!(substitute("", "template").unwrap(), "template");
    }

    #[test]
    fn missing_delimiter_aborts() {
        let error = substitute("A=1\nBROKEN\n", "A").unwrap_err();
        assert!(matches!(error, DefinitionError::MissingDelimiter { .. }));
    }

    #[test]
    fn empty_key_is_rejected() {
        let error = substitute("=X\n", "ab").unwrap_err();
        assert!(matches!(error, DefinitionError::EmptyKey { .. }));
    }

    #[test]
    fn template_line_endings_are_preserved() {
        assert_eq!(substitute("A=1\n", "A\r\nA").unwrap(), "1\r\n1");
    }

    #[test]
    fn last_line_is_kept_without_trailing_newline() {
        assert_eq!(substitute("A=1\nB=2", "A B").unwrap(), "1 2");
    }

    #[test]
    fn report_counts_replacements() {
        let definitions: Definitions = "A=B\nB=C\nZ=z\n".parse().unwrap();
        let substituted = definitions.apply("A B");

        let counts: Vec<_> = substituted
            .applied()
            .iter()
            .map(|a| (a.definition.key(), a.replacements))
            .collect();
        assert_eq!(counts, vec![("A", 1), ("B", 2), ("Z", 0)]);
        assert_eq!(substituted.replacements(), 3);
        assert_eq!(
            substituted.unused().map(Definition::key).collect::<Vec<_>>(),
            vec!["Z"]
        );
        assert_eq!(substituted.text(), "C C");
    }
}
