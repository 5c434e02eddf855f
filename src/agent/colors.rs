//! Color alias table — free-text color words to the canonical palette.
//!
//! DESIGN
//! ======
//! The editor supports twelve canonical colors. User text uses a wider
//! vocabulary ("cyan", "navy", "purple", ...), so resolution walks a fixed,
//! ordered alias list and returns the first whole-word match. Order is part
//! of the contract: "a grey and red box" resolves to grey because the grey
//! aliases are declared before red, not because of text position.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical palette understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Grey,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Indigo,
    Violet,
    Pink,
    White,
}

impl Color {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Grey => "grey",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Violet => "violet",
            Self::Pink => "pink",
            Self::White => "white",
        }
    }
}

/// Alias → canonical color, in resolution order.
pub const COLOR_ALIASES: [(&str, Color); 20] = [
    ("black", Color::Black),
    ("grey", Color::Grey),
    ("gray", Color::Grey),
    ("silver", Color::Grey),
    ("red", Color::Red),
    ("orange", Color::Orange),
    ("yellow", Color::Yellow),
    ("green", Color::Green),
    ("teal", Color::Teal),
    ("cyan", Color::Teal),
    ("turquoise", Color::Teal),
    ("blue", Color::Blue),
    ("indigo", Color::Indigo),
    ("navy", Color::Indigo),
    ("violet", Color::Violet),
    ("purple", Color::Violet),
    ("pink", Color::Pink),
    ("white", Color::White),
    ("ivory", Color::White),
    ("off-white", Color::White),
];

static ALIAS_PATTERNS: LazyLock<Vec<(Regex, Color)>> = LazyLock::new(|| {
    COLOR_ALIASES
        .iter()
        .map(|&(alias, color)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(alias));
            (Regex::new(&pattern).expect("static alias pattern"), color)
        })
        .collect()
});

/// Resolve the first color alias mentioned in `text`.
///
/// Whole-word, case-insensitive. Returns `None` when no alias matches —
/// absence is meaningful for transform hints and must not default.
#[must_use]
pub fn resolve_color(text: &str) -> Option<Color> {
    ALIAS_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|&(_, color)| color)
}

#[cfg(test)]
#[path = "colors_test.rs"]
mod tests;
