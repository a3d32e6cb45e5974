//! The render loop and the lifecycle of an indicator.
//!
//! Entering a [`BusyPal`] starts a detached thread that redraws the line every interval.
//! The [`Busy`] guard returned by [`BusyPal::enter`] stops it again and leaves a final
//! line behind, once, either when it is explicitly finished or when it is dropped.
//! A guard dropped without being finished leaves the failure line.
//!
//! Drawing is advisory: write errors are logged and never cost the caller the task's result.
//!
//! Only one indicator may draw to a stream at a time, and nothing else should write to
//! that stream while it is active. Nesting indicators produces interleaved garbage.

use std::{
    io::{self, Stdout, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    thread,
    time::Instant,
};

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, trace, warn};

use crate::{
    session::{SessionInspector, SkipMode, TerminalSession},
    style::{self, visible_width},
    template::{self, Placeholder, Values},
    CleanupPolicy, IndicatorConfig, Options, Registry, Result, SpinnerStream,
};

/// How the wrapped task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The task completed normally.
    Done,
    /// The task returned an error or panicked.
    Failed,
}

/// A busy indicator writing to `O`.
///
/// # Usage
/// ```rust,no_run
/// use std::time::Duration;
/// use busypal::{BusyPal, Options};
///
/// let pal = BusyPal::new(Options::new().message("Please wait")).unwrap();
/// let ret = pal.run(|| -> Result<u32, String> {
///     std::thread::sleep(Duration::from_secs(1));
///     Ok(42)
/// });
/// assert_eq!(ret.unwrap(), Ok(42));
/// ```
#[derive(Debug)]
pub struct BusyPal<O: Write + Send + 'static = Stdout> {
    config: Arc<IndicatorConfig>,
    output: Arc<Mutex<O>>,
}

impl BusyPal<Stdout> {
    /// Create an indicator drawing to stdout, animating only if stdout is a terminal.
    ///
    /// # Result
    /// Returns an [`crate::Error::InvalidArgument`] if the options are unusable.
    pub fn new(options: Options) -> Result<Self> {
        Self::with_output(options, io::stdout(), &TerminalSession)
    }
}

impl<O: Write + Send + 'static> BusyPal<O> {
    /// Create an indicator drawing to `output`, asking `session` whether to animate.
    pub fn with_output(
        options: Options,
        output: O,
        session: &dyn SessionInspector,
    ) -> Result<Self> {
        let config = IndicatorConfig::resolve(options, Registry::standard(), session)?;
        Ok(Self::from_config(config, output))
    }

    /// Create an indicator from an already resolved configuration.
    pub fn from_config(config: IndicatorConfig, output: O) -> Self {
        Self {
            config: Arc::new(config),
            output: Arc::new(Mutex::new(output)),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Lock and get the output stream.
    pub fn output(&self) -> MutexGuard<'_, O> {
        lock(&self.output)
    }

    /// Start the indicator.
    ///
    /// In [`SkipMode::MessageOnly`] the message is printed once, in [`SkipMode::Silent`]
    /// nothing happens; otherwise the animation starts in the background and this
    /// returns right away.
    ///
    /// # Result
    /// Returns [`crate::Error::Io`] if the render thread cannot be spawned.
    pub fn enter(&self) -> Result<Busy<'_, O>> {
        let mode = self.config.skip_mode;
        debug!(?mode, text = %self.config.message, "entering busy indicator");

        let state = match mode {
            SkipMode::Silent => State::Skipped,
            SkipMode::MessageOnly => {
                if !self.config.message.is_empty() {
                    let mut output = self.output();
                    if let Err(e) = writeln!(output, "{}", self.config.message)
                        .and_then(|_| output.flush())
                    {
                        warn!(error = %e, "could not print busy message");
                    }
                }
                State::Skipped
            }
            SkipMode::Run => {
                let active = Arc::new(AtomicBool::new(true));
                let (tx, stopped) = channel::bounded(1);
                let config = Arc::clone(&self.config);
                let output = Arc::clone(&self.output);
                let flag = Arc::clone(&active);

                // Detached: the handle is dropped and the thread never holds up process exit.
                thread::Builder::new()
                    .name("busypal-render".to_string())
                    .spawn(move || render_loop(&config, &output, &flag, &tx))?;

                State::Running { active, stopped }
            }
        };

        Ok(Busy {
            pal: self,
            state,
        })
    }

    /// Run `task` with the indicator shown, then leave the success or failure line.
    ///
    /// The task's own result is handed back untouched, even if drawing the indicator
    /// fails halfway. A panic inside `task` still leaves the failure line and then keeps
    /// unwinding.
    ///
    /// # Returns
    /// Returns the result of the given task, or [`crate::Error::Io`] if the indicator
    /// could not be started, in which case `task` is not run.
    pub fn run<F, T, E>(&self, task: F) -> Result<std::result::Result<T, E>>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let busy = self.enter()?;
        Ok(busy.finish(task()))
    }

    /// Wrap `task` so that every call runs it with the indicator shown.
    ///
    /// ```rust,no_run
    /// use busypal::{BusyPal, Options};
    ///
    /// let fetch = BusyPal::new(Options::new().message("Fetching"))
    ///     .unwrap()
    ///     .wrap(|url: &str| -> Result<usize, String> { Ok(url.len()) });
    /// assert_eq!(fetch("https://example.com").unwrap(), Ok(19));
    /// ```
    pub fn wrap<A, F, T, E>(self, task: F) -> impl Fn(A) -> Result<std::result::Result<T, E>>
    where
        F: Fn(A) -> std::result::Result<T, E>,
    {
        move |arg| self.run(|| task(arg))
    }

    /// Compose the line left behind once the task is over.
    fn final_line(&self, outcome: Outcome) -> String {
        let config = &self.config;
        let hidden = match &config.cleanup {
            CleanupPolicy::Fields(fields) => fields,
            CleanupPolicy::All => return String::new(),
        };
        let paint = |text: &str| match outcome {
            Outcome::Done => style::done(text),
            Outcome::Failed => style::fail(text),
        };

        let mut format = config.format.clone();
        let mut values = Values::new();
        for placeholder in Placeholder::ALL {
            if !template::contains(&format, placeholder) {
                continue;
            }
            if hidden.contains(&placeholder) {
                format = template::remove_block(&format, placeholder);
                continue;
            }
            let value = match placeholder {
                Placeholder::Spinner1 | Placeholder::Spinner2 => match config.spinner(placeholder) {
                    Some(spinner) => paint(match outcome {
                        Outcome::Done => spinner.frames.success(),
                        Outcome::Failed => spinner.frames.failure(),
                    }),
                    None => continue,
                },
                Placeholder::Message => config.message.clone(),
                Placeholder::Outcome => paint(match outcome {
                    Outcome::Done => config.done_text.as_str(),
                    Outcome::Failed => config.fail_text.as_str(),
                }),
            };
            values.insert(placeholder, value);
        }

        template::render(&format, &values).trim_start().to_string()
    }
}

/// The format as drawn while running: no outcome yet.
fn running_template(format: &str) -> String {
    if template::contains(format, Placeholder::Outcome) {
        // The extra space masks a trailing glyph some terminals leave blinking.
        template::remove_block(format, Placeholder::Outcome) + " "
    } else {
        format.to_string()
    }
}

fn lock<O>(output: &Mutex<O>) -> MutexGuard<'_, O> {
    output.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Redraw the line until `active` is cleared or a write fails, then send the last
/// drawn line on `stopped`.
fn render_loop<O: Write>(
    config: &IndicatorConfig,
    output: &Mutex<O>,
    active: &AtomicBool,
    stopped: &Sender<String>,
) {
    let mut spinner1 = config
        .spinner1
        .as_ref()
        .map(|s| SpinnerStream::new(s.frames.clone(), s.style));
    let mut spinner2 = config
        .spinner2
        .as_ref()
        .map(|s| SpinnerStream::new(s.frames.clone(), s.style));

    let line = running_template(&config.format);
    let mut values = Values::new();
    if template::contains(&line, Placeholder::Message) {
        values.insert(Placeholder::Message, config.message.clone());
    }

    let draw = |text: &str| -> io::Result<()> {
        let mut output = lock(output);
        write!(output, "{}", text)?;
        output.flush()
    };

    let mut last = String::new();
    while active.load(Ordering::SeqCst) {
        if let Some(spinner) = spinner1.as_mut() {
            values.insert(Placeholder::Spinner1, spinner.next_frame());
        }
        if let Some(spinner) = spinner2.as_mut() {
            values.insert(Placeholder::Spinner2, spinner.next_frame());
        }
        let rendered = template::render(&line, &values);
        trace!(line = %rendered, "drawing frame");

        if let Err(e) = draw(&format!("\r{}", rendered)) {
            warn!(error = %e, "busy indicator stopped drawing");
            break;
        }
        last = rendered;

        thread::sleep(config.interval);
        if !active.load(Ordering::SeqCst) {
            break;
        }
        if let Err(e) = draw("\x08") {
            warn!(error = %e, "busy indicator stopped drawing");
            break;
        }
    }

    let _ = stopped.send(last);
}

enum State {
    Skipped,
    Running {
        active: Arc<AtomicBool>,
        stopped: Receiver<String>,
    },
    Finished,
}

/// A started indicator. Finishing or dropping it stops the animation and draws the final line.
///
/// Use [`Busy::finish`] or [`Busy::exit`] to end it. A guard dropped without either, on an
/// early `?` return or while panicking, ends with the failure line.
///
/// The final line ends with a newline on success only. On failure the cursor stays at the
/// end of the failure line, so the error reported next by the caller follows it directly
/// without a blank line in between.
#[must_use = "dropping the guard immediately ends the indicator"]
pub struct Busy<'a, O: Write + Send + 'static> {
    pal: &'a BusyPal<O>,
    state: State,
}

impl<'a, O: Write + Send + 'static> Busy<'a, O> {
    /// End the indicator according to the task's result and hand the result back.
    ///
    /// A failure to draw the final line is logged, `ret` is always returned as is.
    pub fn finish<T, E>(mut self, ret: std::result::Result<T, E>) -> std::result::Result<T, E> {
        let outcome = match &ret {
            Ok(_) => Outcome::Done,
            Err(_) => Outcome::Failed,
        };
        if let Err(e) = self.transition(outcome) {
            warn!(error = %e, "could not end busy indicator");
        }
        ret
    }

    /// End the indicator with the given outcome.
    ///
    /// # Result
    /// Returns [`crate::Error::Io`] if the final line cannot be written.
    pub fn exit(mut self, outcome: Outcome) -> Result<()> {
        self.transition(outcome)
    }

    fn transition(&mut self, outcome: Outcome) -> Result<()> {
        let (active, stopped) = match std::mem::replace(&mut self.state, State::Finished) {
            State::Running { active, stopped } => (active, stopped),
            State::Skipped | State::Finished => return Ok(()),
        };
        debug!(?outcome, "leaving busy indicator");

        let pal = self.pal;
        let interval = pal.config.interval;

        active.store(false, Ordering::SeqCst);
        let last = wait_stopped(&stopped, Instant::now() + interval * 2);

        let mut output = pal.output();
        match &pal.config.cleanup {
            CleanupPolicy::All => {
                write!(output, "\r{}\r", " ".repeat(visible_width(&last)))?;
                output.flush()?;
            }
            CleanupPolicy::Fields(_) => {
                let line = pal.final_line(outcome);
                let padding = visible_width(&last).saturating_sub(visible_width(&line));
                write!(output, "\r{}{}", line, " ".repeat(padding))?;
                if outcome == Outcome::Done {
                    writeln!(output)?;
                }
                output.flush()?;
                drop(output);
                thread::sleep(interval);
            }
        }

        Ok(())
    }
}

/// Wait for the render loop to stop until `deadline`, returning the last line it drew.
///
/// A loop that has not stopped by then yields an empty line and no padding.
fn wait_stopped(stopped: &Receiver<String>, deadline: Instant) -> String {
    match stopped.recv_deadline(deadline) {
        Ok(last) => last,
        Err(e) => {
            debug!(error = %e, "render loop did not stop in time");
            String::new()
        }
    }
}

impl<'a, O: Write + Send + 'static> Drop for Busy<'a, O> {
    fn drop(&mut self) {
        // Reached only without `finish` or `exit`: a panic or an early return.
        if let Err(e) = self.transition(Outcome::Failed) {
            warn!(error = %e, "could not end busy indicator");
        }
    }
}
