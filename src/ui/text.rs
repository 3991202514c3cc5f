use crossterm::style::Stylize;

use crate::ui::theme;

/// Paint applied to one span of status-line text. Which paint a line gets
/// follows its severity; the success color is carried by the icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Error,
    Warning,
    /// Emphasized info, for the banner and site headers.
    Title,
    Dim,
}

impl Paint {
    /// Apply the paint, or pass the text through untouched when the output
    /// does not support color.
    pub fn apply(self, text: &str, supports_color: bool) -> String {
        if !supports_color {
            return text.to_string();
        }
        let styled = match self {
            Paint::Error => text.with(theme::colors::ERROR),
            Paint::Warning => text.with(theme::colors::WARNING),
            Paint::Title => text.with(theme::colors::INFO).bold(),
            Paint::Dim => text.with(theme::colors::DIM),
        };
        styled.to_string()
    }
}
