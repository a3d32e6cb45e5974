//! Animation frame sets and the registry of built-in ones.
//!
//! A [`FrameSet`] is an ordered list of frames where the last two entries are
//! reserved: the second to last is shown when a task fails, the last one when it
//! succeeds. Everything before them is cycled through while the task runs.

use std::sync::OnceLock;

use crate::{Error, Result};

/// Id of the frame set used when no style is given (`|/-\`).
pub const DEFAULT_STYLE_ID: usize = 0;

/// An immutable animation: animated frames followed by the failure and success glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<String>,
}

impl FrameSet {
    /// Build a frame set from a sequence of (possibly multi-character) frames.
    /// The final two *elements* are the failure and success glyphs.
    ///
    /// # Result
    /// Returns [`Error::InvalidArgument`] if fewer than 3 frames are given.
    ///
    /// # Usage
    /// ```rust
    /// use busypal::FrameSet;
    ///
    /// let frames = FrameSet::new(["[=  ]", "[ = ]", "[  =]", "x", "ok"]).unwrap();
    /// assert_eq!(frames.animated().len(), 3);
    /// assert_eq!(frames.success(), "ok");
    /// ```
    pub fn new<I, S>(frames: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let frames: Vec<String> = frames.into_iter().map(Into::into).collect();
        if frames.len() < 3 {
            return Err(Error::invalid(format!(
                "a frame set needs at least one animated frame plus a failure and a success glyph, got {} frames",
                frames.len()
            )));
        }
        Ok(Self { frames })
    }

    /// Build a frame set from a single string, one frame per character.
    /// The final two *characters* are the failure and success glyphs.
    ///
    /// ```rust
    /// use busypal::FrameSet;
    ///
    /// let frames = FrameSet::from_glyphs("◐◓◑◒✘✔").unwrap();
    /// assert_eq!(frames.animated(), ["◐", "◓", "◑", "◒"]);
    /// assert_eq!(frames.failure(), "✘");
    /// ```
    pub fn from_glyphs(glyphs: &str) -> Result<Self> {
        Self::new(glyphs.chars().map(String::from))
    }

    /// The frames cycled through while running.
    pub fn animated(&self) -> &[String] {
        &self.frames[..self.frames.len() - 2]
    }

    /// The glyph shown in place of the spinner when the task fails.
    pub fn failure(&self) -> &str {
        &self.frames[self.frames.len() - 2]
    }

    /// The glyph shown in place of the spinner when the task succeeds.
    pub fn success(&self) -> &str {
        &self.frames[self.frames.len() - 1]
    }

    /// Total number of frames, reserved glyphs included.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`, a frame set holds at least 3 frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// A fixed catalogue of frame sets addressed by id.
///
/// [`Registry::standard`] holds the built-in animations. A custom registry can be
/// handed to [`crate::IndicatorConfig::resolve`] instead.
#[derive(Debug, Clone)]
pub struct Registry {
    sets: Vec<FrameSet>,
}

impl Registry {
    /// Create a registry from the given frame sets, ids follow their order.
    pub fn new(sets: Vec<FrameSet>) -> Self {
        Self { sets }
    }

    /// The built-in animations, built on first use and shared afterwards.
    pub fn standard() -> &'static Registry {
        static STANDARD: OnceLock<Registry> = OnceLock::new();
        STANDARD.get_or_init(|| Registry::new(BUILTIN.iter().map(Builtin::frame_set).collect()))
    }

    /// Get the frame set with the given id.
    ///
    /// # Result
    /// Returns [`Error::InvalidFrameSetId`] if `id` is out of range.
    pub fn lookup(&self, id: usize) -> Result<&FrameSet> {
        self.sets.get(id).ok_or(Error::InvalidFrameSetId {
            id,
            len: self.sets.len(),
        })
    }

    /// Number of frame sets in the registry.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

enum Builtin {
    Glyphs(&'static str),
    Frames(&'static [&'static str]),
}

impl Builtin {
    fn frame_set(&self) -> FrameSet {
        let frames: Vec<String> = match self {
            Builtin::Glyphs(glyphs) => glyphs.chars().map(String::from).collect(),
            Builtin::Frames(frames) => frames.iter().map(|f| f.to_string()).collect(),
        };
        FrameSet { frames }
    }
}

static BUILTIN: [Builtin; 37] = [
    Builtin::Glyphs("|/-\\✘✔"),
    Builtin::Glyphs("⠁⠈⠐⠠⢀⡀⠄⠂✘✔"),
    Builtin::Glyphs("∙○⦿●✘✔"),
    Builtin::Glyphs("▏▎▍▌▋▊▉█▉▊▋▌▍▎▏✘✔"),
    Builtin::Glyphs("▏▎▍▌▋▊▉█✘✔"),
    Builtin::Glyphs("▁▂▃▄▅▆▇█▇▆▅▄▃▂✘✔"),
    Builtin::Glyphs("⣾⣷⣯⣟⡿⢿⣻⣽✘✔"),
    Builtin::Glyphs("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏✘✔"),
    Builtin::Glyphs("⠋⠙⠚⠞⠖⠦⠴⠲⠳⠓✘✔"),
    Builtin::Glyphs("⠄⠆⠇⠋⠙⠸⠰⠠⠰⠸⠙⠋⠇⠆✘✔"),
    Builtin::Glyphs("⠋⠙⠚⠒⠂⠂⠒⠲⠴⠦⠖⠒⠐⠐⠒⠓⠋✘✔"),
    Builtin::Glyphs("⠁⠉⠙⠚⠒⠂⠂⠒⠲⠴⠤⠄⠄⠤⠴⠲⠒⠂⠂⠒⠚⠙⠉⠁✘✔"),
    Builtin::Glyphs("⠈⠉⠋⠓⠒⠐⠐⠒⠖⠦⠤⠠⠠⠤⠦⠖⠒⠐⠐⠒⠓⠋⠉⠈✘✔"),
    Builtin::Glyphs("⠁⠁⠉⠙⠚⠒⠂⠂⠒⠲⠴⠤⠄⠄⠤⠠⠠⠤⠦⠖⠒⠐⠐⠒⠓⠋⠉⠈⠈✘✔"),
    Builtin::Glyphs("←↖↑↗→↘↓↙✘✔"),
    Builtin::Glyphs("◴◷◶◵✘✔"),
    Builtin::Glyphs("◰◳◲◱✘✔"),
    Builtin::Glyphs("◐◓◑◒✘✔"),
    Builtin::Glyphs("▌▄▐▀✘✔"),
    Builtin::Glyphs("■□▪▫✘✔"),
    Builtin::Frames(&["▁▂▃", "▄▅▆", "▇█▇", "▆▅▄", "▃▂▁", "✘", "✔"]),
    Builtin::Frames(&["○○○", "⦿○○", "●○○", "●⦿○", "●●○", "●●⦿", "●●●", "✘", "✔"]),
    Builtin::Frames(&["○○○", "⦿○○", "●○○", "○⦿○", "○●○", "○○⦿", "○○●", "✘", "✔"]),
    Builtin::Frames(&["∙∙∙", "●∙∙", "∙●∙", "∙∙●", "✘", "✔"]),
    Builtin::Frames(&[
        "   ", "∙  ", "∙∙ ", "∙∙∙", " ∙∙", "  ∙", "   ", "  ∙", " ∙∙", "∙∙∙", "∙∙ ", "∙  ", "✘",
        "✔",
    ]),
    Builtin::Frames(&[
        "|-----|", "|#----|", "|-#---|", "|--#--|", "|---#-|", "|----#|", "✘", "✔",
    ]),
    Builtin::Frames(&[
        "|-----|", "|#----|", "|-#---|", "|--#--|", "|---#-|", "|----#|", "✘", "✔",
    ]),
    Builtin::Frames(&[
        "|#----|", "|-#---|", "|--#--|", "|---#-|", "|----#|", "|---#-|", "|--#--|", "|-#---|",
        "✘", "✔",
    ]),
    Builtin::Frames(&[
        "------", ">-----", "->----", "-->---", "--->--", "---->-", "----->", "✘", "✔",
    ]),
    Builtin::Frames(&[
        "------", ">-----", ">>----", "->>---", "-->>--", "--->>-", "---->>", "----->", "✘", "✔",
    ]),
    Builtin::Frames(&[
        "|●    |", "| ●   |", "|  ●  |", "|   ● |", "|    ●|", "|   ● |", "|  ●  |", "| ●   |",
        "✘", "✔",
    ]),
    Builtin::Frames(&[
        "|●∙   |", "|∙●   |", "| ∙●  |", "|  ∙● |", "|   ∙●|", "|   ●∙|", "|  ●∙ |", "| ●∙  |",
        "✘", "✔",
    ]),
    Builtin::Frames(&[
        "|█    |", "| █   |", "|  █  |", "|   █ |", "|    █|", "|   █ |", "|  █  |", "| █   |",
        "✘", "✔",
    ]),
    Builtin::Frames(&[
        "|▍    |", "|▊    |", "|█    |", "| █   |", "|  █  |", "|   █ |", "|    █|", "|    █|",
        "|   █ |", "|  █  |", "| █   |", "✘", "✔",
    ]),
    Builtin::Frames(&["   ", ".  ", ".. ", "...", "✘", "✔"]),
    Builtin::Frames(&["▷▷▷", "▶▷▷", "▷▶▷", "▷▷▶", "✘", "✔"]),
    Builtin::Frames(&[
        "•–––––––––––––",
        "–•––––––––––––",
        "––•–––––––––––",
        "–––•––––––––––",
        "––––•–––––––––",
        "–––––√––––––––",
        r"–––––√\–––––––",
        r"–––––√\/––––––",
        r"–––––√\/•–––––",
        r"–––––√\/–•––––",
        r"––––––\/––•–––",
        "–––––––/–––•––",
        "––––––––––––•–",
        "–––––––––––––•",
        "✘",
        "✔",
    ]),
];

#[cfg(test)]
mod tests {
    use super::{FrameSet, Registry, DEFAULT_STYLE_ID};
    use crate::Error;

    #[test]
    fn test_standard_registry() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), 37);
        for id in 0..registry.len() {
            let set = registry.lookup(id).unwrap();
            assert!(set.len() >= 3, "frame set {} is too short", id);
            assert_eq!(set.failure(), "✘");
            assert_eq!(set.success(), "✔");
        }
    }

    #[test]
    fn test_default_style() {
        let set = Registry::standard().lookup(DEFAULT_STYLE_ID).unwrap();
        assert_eq!(set.animated(), ["|", "/", "-", "\\"]);
    }

    #[test]
    fn test_lookup_out_of_range() {
        match Registry::standard().lookup(37) {
            Err(Error::InvalidFrameSetId { id: 37, len: 37 }) => {}
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }

    #[test]
    fn test_glyphs_and_elements_differ() {
        let glyphs = FrameSet::from_glyphs("abxy").unwrap();
        assert_eq!(glyphs.animated(), ["a", "b"]);
        assert_eq!(glyphs.failure(), "x");
        assert_eq!(glyphs.success(), "y");

        let elements = FrameSet::new(["ab", "xy", "!", "+"]).unwrap();
        assert_eq!(elements.animated(), ["ab", "xy"]);
        assert_eq!(elements.failure(), "!");
        assert_eq!(elements.success(), "+");
    }

    #[test]
    fn test_too_short() {
        assert!(FrameSet::new(["x", "y"]).unwrap_err().is_invalid_argument());
        assert!(FrameSet::from_glyphs("✘✔").is_err());
        assert!(FrameSet::from_glyphs("").is_err());
    }

    #[test]
    fn test_multibyte_frames_are_split_per_char() {
        let set = Registry::standard().lookup(7).unwrap();
        assert_eq!(set.animated().len(), 10);
        assert_eq!(set.animated()[0], "⠋");
    }
}
