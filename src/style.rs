//! Colour and weight of spinner frames, and the fixed styles of the exit line.

use std::str::FromStr;

use owo_colors::{AnsiColors, DynColors, Style};

use crate::{Error, Result};

/// Text weight (typeface) applied to a spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    /// No effect.
    #[default]
    Normal,
    /// Bold.
    Bold,
    /// Dimmed.
    Dim,
    /// Italic.
    Italic,
    /// Underlined.
    Underline,
    /// Blinking.
    Blink,
    /// Foreground and background swapped.
    Reverse,
    /// Hidden.
    Hidden,
    /// Struck through.
    Strikethrough,
}

impl Weight {
    fn apply(self, style: Style) -> Style {
        match self {
            Weight::Normal => style,
            Weight::Bold => style.bold(),
            Weight::Dim => style.dimmed(),
            Weight::Italic => style.italic(),
            Weight::Underline => style.underline(),
            Weight::Blink => style.blink(),
            Weight::Reverse => style.reversed(),
            Weight::Hidden => style.hidden(),
            Weight::Strikethrough => style.strikethrough(),
        }
    }
}

impl FromStr for Weight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "reset" | "regular" => Ok(Weight::Normal),
            "bold" => Ok(Weight::Bold),
            "dim" | "dimmed" => Ok(Weight::Dim),
            "italic" => Ok(Weight::Italic),
            "underline" | "underlined" => Ok(Weight::Underline),
            "blink" => Ok(Weight::Blink),
            "reverse" | "reversed" => Ok(Weight::Reverse),
            "hidden" => Ok(Weight::Hidden),
            "strikethrough" => Ok(Weight::Strikethrough),
            other => Err(Error::invalid(format!("unknown weight `{}`", other))),
        }
    }
}

/// Colours and weight for a spinner, as given by the user.
///
/// Names are only checked when the indicator is built, see [`StyleSpec::resolve`].
///
/// ```rust
/// use busypal::StyleSpec;
///
/// let spec = StyleSpec::new().fore("black").back("#ff8700").weight("bold");
/// assert!(spec.resolve().is_ok());
/// assert!(StyleSpec::new().fore("dark_orange").resolve().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSpec {
    fore: Option<String>,
    back: Option<String>,
    weight: Option<String>,
}

impl StyleSpec {
    /// An empty spec, frames are written without any styling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground colour, an ANSI colour name or `#rrggbb`.
    pub fn fore(mut self, color: impl Into<String>) -> Self {
        self.fore = Some(color.into());
        self
    }

    /// Set the background colour, an ANSI colour name or `#rrggbb`.
    pub fn back(mut self, color: impl Into<String>) -> Self {
        self.back = Some(color.into());
        self
    }

    /// Set the weight, e.g. `bold` or `dim`.
    pub fn weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Turn the names into a [`Style`].
    ///
    /// # Result
    /// Returns [`Error::InvalidArgument`] for an unknown colour or weight.
    /// An empty spec resolves to `None`.
    pub fn resolve(&self) -> Result<Option<Style>> {
        if self == &StyleSpec::default() {
            return Ok(None);
        }

        let mut style = Style::new();
        if let Some(fore) = &self.fore {
            style = style.color(parse_color(fore)?);
        }
        if let Some(back) = &self.back {
            style = style.on_color(parse_color(back)?);
        }
        if let Some(weight) = &self.weight {
            style = weight.parse::<Weight>()?.apply(style);
        }
        Ok(Some(style))
    }
}

fn parse_color(name: &str) -> Result<DynColors> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| Error::invalid(format!("invalid hex colour `{}`", name)))
        };
        if hex.len() != 6 {
            return Err(Error::invalid(format!("invalid hex colour `{}`", name)));
        }
        return Ok(DynColors::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }

    let normalized = name.to_ascii_lowercase().replace(['-', ' '], "_");
    let color = match normalized.as_str() {
        "black" => AnsiColors::Black,
        "red" => AnsiColors::Red,
        "green" => AnsiColors::Green,
        "yellow" => AnsiColors::Yellow,
        "blue" => AnsiColors::Blue,
        "magenta" => AnsiColors::Magenta,
        "cyan" => AnsiColors::Cyan,
        "white" => AnsiColors::White,
        "default" => AnsiColors::Default,
        "bright_black" | "grey" | "gray" => AnsiColors::BrightBlack,
        "bright_red" => AnsiColors::BrightRed,
        "bright_green" => AnsiColors::BrightGreen,
        "bright_yellow" => AnsiColors::BrightYellow,
        "bright_blue" => AnsiColors::BrightBlue,
        "bright_magenta" => AnsiColors::BrightMagenta,
        "bright_cyan" => AnsiColors::BrightCyan,
        "bright_white" => AnsiColors::BrightWhite,
        _ => return Err(Error::invalid(format!("unknown colour `{}`", name))),
    };
    Ok(DynColors::Ansi(color))
}

/// Apply an optional style to a piece of text.
pub(crate) fn paint(text: &str, style: Option<&Style>) -> String {
    match style {
        Some(style) => style.style(text).to_string(),
        None => text.to_string(),
    }
}

/// Green and bold, used for the success glyph and the done text.
pub fn done(text: &str) -> String {
    Style::new().green().bold().style(text).to_string()
}

/// Red and bold, used for the failure glyph and the fail text.
pub fn fail(text: &str) -> String {
    Style::new().red().bold().style(text).to_string()
}

/// Number of characters a line occupies on screen, ANSI escape sequences excluded.
pub(crate) fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // CSI sequences end with a byte in '@'..='~'.
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        if c != '\r' && c != '\x08' {
            width += 1;
        }
    }
    width
}
