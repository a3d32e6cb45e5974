//! Deciding whether the indicator should animate at all.

use std::{io, str::FromStr};

use crate::{Error, Result};

/// Tells whether output currently ends up on an interactive screen.
pub trait SessionInspector {
    /// `true` if output is shown on a screen, `false` if it is piped or redirected.
    fn is_interactive_display(&self) -> bool;
}

/// Inspects the process' stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalSession;

impl SessionInspector for TerminalSession {
    fn is_interactive_display(&self) -> bool {
        termion::is_tty(&io::stdout())
    }
}

/// A session with a fixed answer, for forcing the decision.
#[derive(Debug, Clone, Copy)]
pub struct FixedSession(pub bool);

impl SessionInspector for FixedSession {
    fn is_interactive_display(&self) -> bool {
        self.0
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Skip {
    /// Animate on a screen, print only the message when output is redirected.
    #[default]
    Auto,
    /// Always animate.
    Run,
    /// Never animate, print the message once.
    MessageOnly,
    /// Print nothing at all.
    Silent,
}

/// How an indicator actually behaves, decided once when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipMode {
    /// Run the animation.
    Run,
    /// Print the message once, no animation.
    MessageOnly,
    /// Print nothing.
    Silent,
}

impl FromStr for Skip {
    type Err = Error;

    /// Accepts the mode names as well as the levels `0` (auto), `1` (message only)
    /// and `2` (silent).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "0" => Ok(Skip::Auto),
            "run" => Ok(Skip::Run),
            "message_only" | "message-only" | "message" | "1" => Ok(Skip::MessageOnly),
            "silent" | "2" => Ok(Skip::Silent),
            other => Err(Error::invalid(format!("unknown skip mode `{}`", other))),
        }
    }
}

/// Resolve the requested skip behaviour against the session.
///
/// An explicit choice always wins; [`Skip::Auto`] animates only on an interactive display
/// and falls back to printing the message once.
pub fn decide_skip_mode(requested: Skip, interactive: bool) -> SkipMode {
    match requested {
        Skip::Run => SkipMode::Run,
        Skip::MessageOnly => SkipMode::MessageOnly,
        Skip::Silent => SkipMode::Silent,
        Skip::Auto if interactive => SkipMode::Run,
        Skip::Auto => SkipMode::MessageOnly,
    }
}
