//! Styling for the run summary and unused-key warnings on stderr

use owo_colors::{colors::css, OwoColorize};

/// How a line of the run summary is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// The closing "Applied N definition(s)" line (green)
    Summary,
    /// A definition whose key never matched (amber)
    Warning,
    /// Secondary detail such as the output path (dimmed)
    Detail,
}

impl Style {
    /// Renders `text` in this style, leaving it plain when stderr cannot show
    /// colour.
    pub fn paint(self, text: impl AsRef<str>) -> String {
        self.paint_if(stderr_has_color(), text.as_ref())
    }

    fn paint_if(self, color: bool, text: &str) -> String {
        if !color {
            return text.to_string();
        }
        match self {
            Self::Summary => text.fg::<css::Green>().to_string(),
            Self::Warning => text.fg::<css::Orange>().to_string(),
            Self::Detail => text.dimmed().to_string(),
        }
    }
}

fn stderr_has_color() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}
