//! Domain types for template preprocessing.
//!
//! This module contains the definitions parser, the substitution pass and the
//! run configuration.

mod config;
pub use config::Config;

/// `KEY=VALUE` definitions and their parser.
pub mod definition;
pub use definition::{Definition, DefinitionError, Definitions, TrailingNewline};

/// Literal substitution of definitions into a template.
pub mod substitution;
pub use substitution::{substitute, Applied, Substituted};
