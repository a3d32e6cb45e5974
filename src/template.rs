//! Format templates such as `{spinner1} {message} {outcome}`.

use std::{collections::HashMap, fmt, str::FromStr};

use crate::Error;

/// A named slot in a format template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// The first spinner, `{spinner1}` (or its alias `{spinner}`).
    Spinner1,
    /// The second spinner, `{spinner2}`.
    Spinner2,
    /// The message, `{message}`.
    Message,
    /// The done/fail text shown on exit, `{outcome}`.
    Outcome,
}

impl Placeholder {
    /// Every placeholder, in template order of precedence.
    pub const ALL: [Placeholder; 4] = [
        Placeholder::Spinner1,
        Placeholder::Spinner2,
        Placeholder::Message,
        Placeholder::Outcome,
    ];

    /// The placeholder's name without braces.
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Spinner1 => "spinner1",
            Placeholder::Spinner2 => "spinner2",
            Placeholder::Message => "message",
            Placeholder::Outcome => "outcome",
        }
    }

    /// The placeholder as it appears in a template, e.g. `{message}`.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Spinner1 => "{spinner1}",
            Placeholder::Spinner2 => "{spinner2}",
            Placeholder::Message => "{message}",
            Placeholder::Outcome => "{outcome}",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Placeholder {
    type Err = Error;

    /// Parses a placeholder name, `spinner` is accepted as `spinner1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "spinner" | "spinner1" => Ok(Placeholder::Spinner1),
            "spinner2" => Ok(Placeholder::Spinner2),
            "message" => Ok(Placeholder::Message),
            "outcome" => Ok(Placeholder::Outcome),
            other => Err(Error::invalid(format!("unknown placeholder `{}`", other))),
        }
    }
}

/// Current value of each placeholder.
pub type Values = HashMap<Placeholder, String>;

const SPINNER_ALIAS: &str = "{spinner}";

/// Rewrite the `{spinner}` alias into `{spinner1}`.
pub fn normalize_aliases(template: &str) -> String {
    template.replace(SPINNER_ALIAS, Placeholder::Spinner1.token())
}

/// Whether `placeholder` occurs in `template`.
pub fn contains(template: &str, placeholder: Placeholder) -> bool {
    template.contains(placeholder.token())
}

/// Substitute every placeholder of `template` that has a value.
///
/// Tokens without a value and any other braces are kept as they are.
/// Substituted values are never scanned for tokens themselves.
///
/// ```rust
/// use busypal::template::{render, Placeholder, Values};
///
/// let mut values = Values::new();
/// values.insert(Placeholder::Message, "Please wait".to_string());
/// assert_eq!(render("{message} {outcome}", &values), "Please wait {outcome}");
/// ```
pub fn render(template: &str, values: &Values) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let hit = Placeholder::ALL
            .iter()
            .filter(|p| rest.starts_with(p.token()))
            .find_map(|p| values.get(p).map(|value| (p.token().len(), value)));

        match hit {
            Some((len, value)) => {
                out.push_str(value);
                rest = &rest[len..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);

    out
}

/// Remove `placeholder` from `template` together with one adjacent space,
/// so that neither doubled nor dangling separators are left behind.
///
/// ```rust
/// use busypal::template::{remove_block, Placeholder};
///
/// let t = "{spinner1} {message} {outcome}";
/// assert_eq!(remove_block(t, Placeholder::Message), "{spinner1} {outcome}");
/// assert_eq!(remove_block(t, Placeholder::Outcome), "{spinner1} {message}");
/// assert_eq!(remove_block(t, Placeholder::Spinner1), "{message} {outcome}");
/// ```
pub fn remove_block(template: &str, placeholder: Placeholder) -> String {
    let token = placeholder.token();
    let patterns = [
        (format!(" {} ", token), " "),
        (format!(" {}", token), ""),
        (format!("{} ", token), ""),
        (token.to_string(), ""),
    ];

    // A removal can splice a new token together ("{out{outcome}come}"),
    // so repeat until none is left.
    let mut line = template.to_string();
    while line.contains(token) {
        line = patterns.iter().fold(line, |line, (pattern, sub)| {
            line.replace(pattern.as_str(), sub)
        });
    }
    line
}
