//! User facing options and their resolution into an [`IndicatorConfig`].

use std::{collections::BTreeSet, time::Duration};

use owo_colors::Style;
use tracing::debug;

use crate::{
    frames::DEFAULT_STYLE_ID,
    session::{decide_skip_mode, SessionInspector, Skip, SkipMode},
    template::{self, Placeholder},
    Error, FrameSet, Registry, Result, StyleSpec,
};

/// Seconds between two frames when no delay is given.
pub const DEFAULT_DELAY: f64 = 0.13;
/// Format used when none is given.
pub const DEFAULT_FORMAT: &str = "{spinner} {message} {outcome}";
/// Outcome text on success when none is given.
pub const DEFAULT_DONE_TEXT: &str = "Done!";
/// Outcome text on failure when none is given.
pub const DEFAULT_FAIL_TEXT: &str = "Failed!";

/// Where a spinner's frames come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    /// A frame set of the registry.
    Id(usize),
    /// A frame set supplied directly.
    Literal(FrameSet),
}

/// Selects the animation of a spinner and, optionally, how it is styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleArg {
    /// A frame set of the registry, unstyled.
    Id(usize),
    /// A frame set supplied directly, unstyled.
    Literal(FrameSet),
    /// Frames plus colours and weight.
    Spec(FrameSource, StyleSpec),
}

impl StyleArg {
    fn into_parts(self) -> (FrameSource, StyleSpec) {
        match self {
            StyleArg::Id(id) => (FrameSource::Id(id), StyleSpec::default()),
            StyleArg::Literal(frames) => (FrameSource::Literal(frames), StyleSpec::default()),
            StyleArg::Spec(source, spec) => (source, spec),
        }
    }
}

impl From<usize> for StyleArg {
    fn from(id: usize) -> Self {
        StyleArg::Id(id)
    }
}

impl From<FrameSet> for StyleArg {
    fn from(frames: FrameSet) -> Self {
        StyleArg::Literal(frames)
    }
}

/// What to hide from the line left behind once the task is over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cleanup {
    /// Keep every placeholder.
    #[default]
    None,
    /// Blank the whole line.
    All,
    /// Remove the named placeholders, `spinner` is accepted for `spinner1`.
    Fields(Vec<String>),
}

impl Cleanup {
    /// Remove a single placeholder.
    pub fn field(name: impl Into<String>) -> Self {
        Cleanup::Fields(vec![name.into()])
    }

    /// Remove several placeholders.
    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Cleanup::Fields(names.into_iter().map(Into::into).collect())
    }

    fn resolve(self) -> Result<CleanupPolicy> {
        match self {
            Cleanup::None => Ok(CleanupPolicy::Fields(BTreeSet::new())),
            Cleanup::All => Ok(CleanupPolicy::All),
            Cleanup::Fields(names) => names
                .iter()
                .map(|name| name.parse::<Placeholder>())
                .collect::<Result<_>>()
                .map(CleanupPolicy::Fields),
        }
    }
}

impl From<bool> for Cleanup {
    fn from(all: bool) -> Self {
        if all {
            Cleanup::All
        } else {
            Cleanup::None
        }
    }
}

/// Resolved cleanup behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupPolicy {
    /// Blank the line.
    All,
    /// Remove these placeholders, possibly none.
    Fields(BTreeSet<Placeholder>),
}

/// Options for building a [`crate::BusyPal`].
///
/// # Usage
/// ```rust
/// use busypal::{Cleanup, Options, StyleArg, StyleSpec, FrameSource};
///
/// let options = Options::new()
///     .message("Please wait")
///     .format("{spinner1} {message} {spinner2} {outcome}")
///     .style1(StyleArg::Id(20))
///     .style2(StyleArg::Spec(FrameSource::Id(29), StyleSpec::new().fore("cyan")))
///     .delay(0.1)
///     .cleanup(Cleanup::field("spinner2"));
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    message: String,
    format: String,
    style1: Option<StyleArg>,
    style2: Option<StyleArg>,
    frames1: Option<FrameSet>,
    frames2: Option<FrameSet>,
    delay: Option<f64>,
    done_text: String,
    fail_text: String,
    cleanup: Cleanup,
    skip: Skip,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            message: String::new(),
            format: DEFAULT_FORMAT.to_string(),
            style1: None,
            style2: None,
            frames1: None,
            frames2: None,
            delay: None,
            done_text: DEFAULT_DONE_TEXT.to_string(),
            fail_text: DEFAULT_FAIL_TEXT.to_string(),
            cleanup: Cleanup::None,
            skip: Skip::Auto,
        }
    }
}

impl Options {
    /// Options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text shown in the `{message}` placeholder.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Format template, see [`crate::template`].
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Alias for [`Options::style1`].
    pub fn style(self, style: StyleArg) -> Self {
        self.style1(style)
    }

    /// Animation and style of `{spinner1}`.
    pub fn style1(mut self, style: StyleArg) -> Self {
        self.style1 = Some(style);
        self
    }

    /// Animation and style of `{spinner2}`.
    pub fn style2(mut self, style: StyleArg) -> Self {
        self.style2 = Some(style);
        self
    }

    /// Alias for [`Options::frames1`].
    pub fn frames(self, frames: FrameSet) -> Self {
        self.frames1(frames)
    }

    /// Frames of `{spinner1}`, taking precedence over the frames picked by its style.
    pub fn frames1(mut self, frames: FrameSet) -> Self {
        self.frames1 = Some(frames);
        self
    }

    /// Frames of `{spinner2}`, taking precedence over the frames picked by its style.
    pub fn frames2(mut self, frames: FrameSet) -> Self {
        self.frames2 = Some(frames);
        self
    }

    /// Seconds between two frames.
    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }

    /// `{outcome}` text on success.
    pub fn done_text(mut self, text: impl Into<String>) -> Self {
        self.done_text = text.into();
        self
    }

    /// `{outcome}` text on failure.
    pub fn fail_text(mut self, text: impl Into<String>) -> Self {
        self.fail_text = text.into();
        self
    }

    /// What to hide once the task is over.
    pub fn cleanup(mut self, cleanup: impl Into<Cleanup>) -> Self {
        self.cleanup = cleanup.into();
        self
    }

    /// Whether to animate, see [`Skip`].
    pub fn skip(mut self, skip: Skip) -> Self {
        self.skip = skip;
        self
    }
}

/// A spinner placeholder's frames and style.
#[derive(Debug, Clone)]
pub struct SpinnerConfig {
    pub(crate) frames: FrameSet,
    pub(crate) style: Option<Style>,
}

impl SpinnerConfig {
    /// The frames of this spinner.
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }
}

/// Validated, immutable configuration of one indicator.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub(crate) message: String,
    pub(crate) format: String,
    pub(crate) spinner1: Option<SpinnerConfig>,
    pub(crate) spinner2: Option<SpinnerConfig>,
    pub(crate) interval: Duration,
    pub(crate) done_text: String,
    pub(crate) fail_text: String,
    pub(crate) cleanup: CleanupPolicy,
    pub(crate) skip_mode: SkipMode,
}

impl IndicatorConfig {
    /// Validate `options`, look frame sets up in `registry` and decide the skip mode
    /// from `session`.
    ///
    /// # Result
    /// Returns [`Error::InvalidArgument`] or [`Error::InvalidFrameSetId`] for unusable options.
    /// Nothing is written anywhere.
    pub fn resolve(
        options: Options,
        registry: &Registry,
        session: &dyn SessionInspector,
    ) -> Result<Self> {
        let Options {
            message,
            format,
            style1,
            style2,
            frames1,
            frames2,
            delay,
            done_text,
            fail_text,
            cleanup,
            skip,
        } = options;

        let interval = resolve_delay(delay)?;
        let format = template::normalize_aliases(&format);
        let spinner1 = resolve_spinner(&format, Placeholder::Spinner1, style1, frames1, registry)?;
        let spinner2 = resolve_spinner(&format, Placeholder::Spinner2, style2, frames2, registry)?;
        let cleanup = cleanup.resolve()?;
        let skip_mode = decide_skip_mode(skip, session.is_interactive_display());

        debug!(?skip_mode, ?interval, %format, "resolved busy indicator");

        Ok(Self {
            message,
            format,
            spinner1,
            spinner2,
            interval,
            done_text,
            fail_text,
            cleanup,
            skip_mode,
        })
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The format, with aliases normalised.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Time between two frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The skip mode decided at construction.
    pub fn skip_mode(&self) -> SkipMode {
        self.skip_mode
    }

    /// The cleanup policy.
    pub fn cleanup(&self) -> &CleanupPolicy {
        &self.cleanup
    }

    /// The spinner behind a spinner placeholder, if the format uses it.
    pub fn spinner(&self, placeholder: Placeholder) -> Option<&SpinnerConfig> {
        match placeholder {
            Placeholder::Spinner1 => self.spinner1.as_ref(),
            Placeholder::Spinner2 => self.spinner2.as_ref(),
            Placeholder::Message | Placeholder::Outcome => None,
        }
    }
}

fn resolve_delay(delay: Option<f64>) -> Result<Duration> {
    match delay {
        None => Ok(Duration::from_secs_f64(DEFAULT_DELAY)),
        Some(d) if d == 0.0 => Err(Error::invalid(
            "delay can't be zero, try 0.1 (in seconds) or leave it unset for the default",
        )),
        Some(d) if !d.is_finite() || d < 0.0 => Err(Error::invalid(format!(
            "delay must be a positive number of seconds, got {}",
            d
        ))),
        Some(d) => Ok(Duration::from_secs_f64(d)),
    }
}

fn resolve_spinner(
    format: &str,
    placeholder: Placeholder,
    style: Option<StyleArg>,
    frames: Option<FrameSet>,
    registry: &Registry,
) -> Result<Option<SpinnerConfig>> {
    if !template::contains(format, placeholder) {
        return Ok(None);
    }

    let (source, spec) = style
        .unwrap_or(StyleArg::Id(DEFAULT_STYLE_ID))
        .into_parts();
    let frames = match (frames, source) {
        (Some(frames), _) => frames,
        (None, FrameSource::Literal(frames)) => frames,
        (None, FrameSource::Id(id)) => registry.lookup(id)?.clone(),
    };

    Ok(Some(SpinnerConfig {
        frames,
        style: spec.resolve()?,
    }))
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, time::Duration};

    use super::{Cleanup, CleanupPolicy, FrameSource, IndicatorConfig, Options, StyleArg};
    use crate::{
        template::Placeholder, Error, FixedSession, FrameSet, Registry, Skip, SkipMode,
        StyleSpec,
    };

    fn resolve(options: Options) -> crate::Result<IndicatorConfig> {
        IndicatorConfig::resolve(options, Registry::standard(), &FixedSession(true))
    }

    #[test]
    fn test_defaults() {
        let config = resolve(Options::new()).unwrap();
        assert_eq!(config.format(), "{spinner1} {message} {outcome}");
        assert_eq!(config.message(), "");
        assert_eq!(config.interval(), Duration::from_secs_f64(0.13));
        assert_eq!(config.skip_mode(), SkipMode::Run);
        assert_eq!(config.cleanup(), &CleanupPolicy::Fields(BTreeSet::new()));
        assert_eq!(
            config.spinner(Placeholder::Spinner1).unwrap().frames(),
            Registry::standard().lookup(0).unwrap()
        );
        assert!(config.spinner(Placeholder::Spinner2).is_none());
    }

    #[test]
    fn test_zero_delay_fails() {
        let err = resolve(Options::new().delay(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(resolve(Options::new().delay(-1.0)).is_err());
        assert!(resolve(Options::new().delay(f64::NAN)).is_err());
    }

    #[test]
    fn test_invalid_frame_set_id() {
        let err = resolve(Options::new().style(StyleArg::Id(99))).unwrap_err();
        assert!(matches!(err, Error::InvalidFrameSetId { id: 99, .. }));
    }

    #[test]
    fn test_unused_spinner_is_not_resolved() {
        let config = resolve(Options::new().format("{message}").style2(StyleArg::Id(99))).unwrap();
        assert!(config.spinner(Placeholder::Spinner1).is_none());
        assert!(config.spinner(Placeholder::Spinner2).is_none());
    }

    #[test]
    fn test_frames_override_style() {
        let frames = FrameSet::from_glyphs("ab✘✔").unwrap();
        let config = resolve(
            Options::new()
                .style(StyleArg::Spec(FrameSource::Id(5), StyleSpec::new().fore("blue")))
                .frames(frames.clone()),
        )
        .unwrap();
        let spinner = config.spinner(Placeholder::Spinner1).unwrap();
        assert_eq!(spinner.frames(), &frames);
        assert!(spinner.style.is_some());
    }

    #[test]
    fn test_literal_style() {
        let frames = FrameSet::new(["[ ]", "[x]", "!", "+"]).unwrap();
        let config = resolve(
            Options::new()
                .format("{spinner1} {spinner2}")
                .style1(StyleArg::Literal(frames.clone()))
                .style2(StyleArg::Id(7)),
        )
        .unwrap();
        assert_eq!(config.spinner(Placeholder::Spinner1).unwrap().frames(), &frames);
        assert_eq!(
            config.spinner(Placeholder::Spinner2).unwrap().frames().animated()[0],
            "⠋"
        );
    }

    #[test]
    fn test_style_arg_conversions() {
        let frames = FrameSet::from_glyphs("ab✘✔").unwrap();
        assert_eq!(StyleArg::from(7usize), StyleArg::Id(7));
        assert_eq!(StyleArg::from(frames.clone()), StyleArg::Literal(frames));
    }

    #[test]
    fn test_malformed_style_spec() {
        let err = resolve(
            Options::new().style(StyleArg::Spec(
                FrameSource::Id(0),
                StyleSpec::new().back("mauve"),
            )),
        )
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_cleanup_names() {
        let config =
            resolve(Options::new().cleanup(Cleanup::fields(["spinner", "outcome"]))).unwrap();
        let expected: BTreeSet<_> = [Placeholder::Spinner1, Placeholder::Outcome].into();
        assert_eq!(config.cleanup(), &CleanupPolicy::Fields(expected));

        assert_eq!(resolve(Options::new().cleanup(true)).unwrap().cleanup(), &CleanupPolicy::All);
        assert!(resolve(Options::new().cleanup(Cleanup::field("spinner9"))).is_err());
    }

    #[test]
    fn test_skip_resolution() {
        let redirected = |skip| {
            IndicatorConfig::resolve(
                Options::new().skip(skip),
                Registry::standard(),
                &FixedSession(false),
            )
            .unwrap()
            .skip_mode()
        };
        assert_eq!(redirected(Skip::Auto), SkipMode::MessageOnly);
        assert_eq!(redirected(Skip::Run), SkipMode::Run);
        assert_eq!(redirected(Skip::Silent), SkipMode::Silent);
    }

    #[test]
    fn test_custom_registry() {
        let registry = Registry::new(vec![FrameSet::from_glyphs("xyz✘✔").unwrap()]);
        let config =
            IndicatorConfig::resolve(Options::new(), &registry, &FixedSession(true)).unwrap();
        assert_eq!(
            config.spinner(Placeholder::Spinner1).unwrap().frames().animated(),
            ["x", "y", "z"]
        );
        let out_of_range = Options::new().style(StyleArg::Id(1));
        assert!(IndicatorConfig::resolve(out_of_range, &registry, &FixedSession(true)).is_err());
    }
}
