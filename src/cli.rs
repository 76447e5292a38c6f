mod terminal;

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::ArgAction;
use precompiler::{storage, Config, Substituted};
use terminal::Style;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// A TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the substituted text [default: out.pl]
    #[arg(short, long, conflicts_with = "no_output")]
    output: Option<PathBuf>,

    /// Do not write the substituted text to a file
    #[arg(long)]
    no_output: bool,

    /// Require the definitions file to end with a newline
    #[arg(long)]
    strict: bool,

    /// Do not print the substituted text to stdout
    #[arg(short, long)]
    quiet: bool,

    /// File of `KEY=VALUE` definitions, one per line
    definitions: PathBuf,

    /// The template to substitute into
    template: PathBuf,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let stdout = io::stdout();
        self.preprocess(&mut stdout.lock())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the substituted text
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    /// Merges the configuration file (if any) with the command line flags.
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };

        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if self.strict {
            config.require_trailing_newline = true;
        }

        Ok(config)
    }

    #[instrument(skip(out))]
    fn preprocess<W: Write>(self, out: &mut W) -> anyhow::Result<()> {
        let config = self.config()?;

        let definitions =
            precompiler::load_definitions(&self.definitions, config.trailing_newline())
                .with_context(|| {
                    format!("Invalid definitions file {}", self.definitions.display())
                })?;
        let template = storage::read_text(&self.template).context("Failed to read template file")?;

        let substituted = definitions.apply(&template);

        let output = (!self.no_output).then_some(config.output.as_path());
        if let Some(path) = output {
            storage::write_text(path, substituted.text()).context("Failed to write output")?;
        }

        if !self.quiet {
            out.write_all(substituted.text().as_bytes())?;
            out.flush()?;
        }

        report(&substituted, output);

        Ok(())
    }
}

/// Prints a short summary of the run to stderr.
fn report(substituted: &Substituted<'_>, output: Option<&Path>) {
    for definition in substituted.unused() {
        eprintln!(
            "{}",
            Style::Warning.paint(format!(
                "warning: '{}' (line {}) was not found",
                definition.key(),
                definition.line()
            ))
        );
    }

    let summary = format!(
        "Applied {} definition(s), {} replacement(s)",
        substituted.applied().len(),
        substituted.replacements()
    );
    match output {
        Some(path) => eprintln!(
            "{} {}",
            Style::Summary.paint(&summary),
            Style::Detail.paint(format!("-> {}", path.display()))
        ),
        None => eprintln!("{}", Style::Summary.paint(&summary)),
    }
}
