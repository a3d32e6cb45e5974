//! # Busypal
//! Busypal shows an animated busy indicator in the terminal while a long-running task runs,
//! and replaces it with a success or failure line once the task is over.
//!
//! The indicator is drawn from a format template such as `{spinner} {message} {outcome}`,
//! with up to two spinners picked from the built-in [`Registry`] or supplied as a [`FrameSet`].
//! When output is redirected, only the message is printed.
//!
//! Look at the [`BusyPal`] struct for more information.
//!
//! # Usage
//! ```rust,no_run
//! use std::time::Duration;
//! use busypal::{busy, Options, StyleArg};
//!
//! let options = Options::new().message("Please wait").style(StyleArg::Id(7));
//! let ret = busy(options, || -> Result<(), String> {
//!     std::thread::sleep(Duration::from_secs(2));
//!     Ok(())
//! });
//! ```

#![deny(missing_docs)]

mod error;
pub mod frames;
mod indicator;
mod options;
pub mod session;
mod spinner;
pub mod style;
pub mod template;

pub use error::{Error, Result};
pub use frames::{FrameSet, Registry};
pub use indicator::{Busy, BusyPal, Outcome};
pub use options::{
    Cleanup, CleanupPolicy, FrameSource, IndicatorConfig, Options, SpinnerConfig, StyleArg,
};
pub use session::{FixedSession, SessionInspector, Skip, SkipMode, TerminalSession};
pub use spinner::SpinnerStream;
pub use style::{StyleSpec, Weight};

/// Run `task` with a busy indicator on stdout.
///
/// Shorthand for [`BusyPal::new`] followed by [`BusyPal::run`].
///
/// # Returns
/// Returns the result of the given task, or an [`Error`] if the options are unusable
/// or the indicator could not be drawn.
pub fn busy<F, T, E>(options: Options, task: F) -> Result<std::result::Result<T, E>>
where
    F: FnOnce() -> std::result::Result<T, E>,
{
    BusyPal::new(options)?.run(task)
}

#[cfg(test)]
mod tests {
    mod non_interactive {
        use std::{
            panic::{self, AssertUnwindSafe},
            time::Duration,
        };

        use crate::{
            style, BusyPal, Cleanup, FixedSession, FrameSet, Options, Outcome, Skip, StyleArg,
        };

        fn pal(options: Options, interactive: bool) -> BusyPal<Vec<u8>> {
            BusyPal::with_output(options.delay(0.05), Vec::new(), &FixedSession(interactive))
                .unwrap()
        }

        fn output(pal: &BusyPal<Vec<u8>>) -> String {
            String::from_utf8(pal.output().clone()).unwrap()
        }

        fn please_wait() -> Options {
            Options::new()
                .format("{spinner1} {message} {outcome}")
                .message("Please wait")
        }

        #[test]
        fn test_success_line() {
            let pal = pal(please_wait(), true);
            let ret = pal.run(|| -> Result<u32, ()> {
                std::thread::sleep(Duration::from_millis(200));
                Ok(7)
            });
            assert_eq!(ret.unwrap(), Ok(7));

            let s = output(&pal);
            assert!(s.starts_with("\r| Please wait "), "{:?}", s);
            assert!(
                s.ends_with(&format!(
                    "\r{} Please wait {}\n",
                    style::done("✔"),
                    style::done("Done!")
                )),
                "{:?}",
                s
            );
        }

        #[test]
        fn test_failure_line_without_newline() {
            let pal = pal(please_wait(), true);
            let ret = pal.run(|| -> Result<(), String> {
                std::thread::sleep(Duration::from_millis(200));
                Err("boom".to_string())
            });
            assert_eq!(ret.unwrap(), Err("boom".to_string()));

            let s = output(&pal);
            assert!(
                s.ends_with(&format!(
                    "\r{} Please wait {}",
                    style::fail("✘"),
                    style::fail("Failed!")
                )),
                "{:?}",
                s
            );
        }

        #[test]
        fn test_panic_keeps_unwinding() {
            let pal = pal(please_wait(), true);
            let caught = panic::catch_unwind(AssertUnwindSafe(|| {
                pal.run(|| -> Result<(), ()> {
                    std::thread::sleep(Duration::from_millis(100));
                    panic!("boom")
                })
            }));
            let payload = caught.unwrap_err();
            assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
            assert!(output(&pal).ends_with(&style::fail("Failed!")));
        }

        #[test]
        fn test_silent() {
            let pal = pal(please_wait().skip(Skip::Silent), true);
            assert_eq!(pal.run(|| -> Result<(), ()> { Ok(()) }).unwrap(), Ok(()));
            assert_eq!(pal.run(|| -> Result<(), &str> { Err("boom") }).unwrap(), Err("boom"));
            assert!(pal.output().is_empty());
        }

        #[test]
        fn test_redirected_prints_message_once() {
            let pal = pal(please_wait(), false);
            let ret = pal.run(|| -> Result<(), &str> {
                std::thread::sleep(Duration::from_millis(100));
                Err("boom")
            });
            assert_eq!(ret.unwrap(), Err("boom"));
            assert_eq!(output(&pal), "Please wait\n");
        }

        #[test]
        fn test_message_only_empty_message() {
            let pal = pal(Options::new().skip(Skip::MessageOnly), true);
            assert!(pal.run(|| -> Result<(), ()> { Ok(()) }).is_ok());
            assert!(pal.output().is_empty());
        }

        #[test]
        fn test_cleanup_all_blanks_line() {
            let pal = pal(please_wait().cleanup(Cleanup::All), true);
            assert!(pal
                .run(|| -> Result<(), ()> {
                    std::thread::sleep(Duration::from_millis(200));
                    Ok(())
                })
                .is_ok());

            let s = output(&pal);
            assert!(s.ends_with(&format!("\r{}\r", " ".repeat(14))), "{:?}", s);
            assert!(!s.contains("Done!"));
        }

        #[test]
        fn test_cleanup_all_blanks_failure_line() {
            let pal = pal(please_wait().cleanup(Cleanup::All), true);
            let ret = pal.run(|| -> Result<(), &str> {
                std::thread::sleep(Duration::from_millis(200));
                Err("boom")
            });
            assert_eq!(ret.unwrap(), Err("boom"));

            let s = output(&pal);
            assert!(s.ends_with(&format!("\r{}\r", " ".repeat(14))), "{:?}", s);
            assert!(!s.contains("Failed!"));
        }

        #[test]
        fn test_cleanup_fields_pads_shorter_line() {
            let pal = pal(please_wait().cleanup(Cleanup::fields(["spinner", "outcome"])), true);
            assert!(pal
                .run(|| -> Result<(), ()> {
                    std::thread::sleep(Duration::from_millis(200));
                    Ok(())
                })
                .is_ok());

            assert!(output(&pal).ends_with("\rPlease wait   \n"));
        }

        #[test]
        fn test_two_spinners() {
            let options = Options::new()
                .format("{spinner1} {message} {spinner2}")
                .message("msg")
                .style1(StyleArg::Literal(FrameSet::from_glyphs("ab✘✔").unwrap()))
                .style2(StyleArg::Literal(FrameSet::new(["x", "y", "!", "+"]).unwrap()));
            let pal = pal(options, true);
            assert!(pal
                .run(|| -> Result<(), ()> {
                    std::thread::sleep(Duration::from_millis(200));
                    Ok(())
                })
                .is_ok());

            let s = output(&pal);
            assert!(s.starts_with("\ra msg x"), "{:?}", s);
            assert!(s.contains("\rb msg y"), "{:?}", s);
            assert!(s.ends_with(&format!("\r{} msg {}\n", style::done("✔"), style::done("+"))));
        }

        #[test]
        fn test_scoped_guard() {
            let pal = pal(please_wait(), true);
            let busy = pal.enter().unwrap();
            std::thread::sleep(Duration::from_millis(100));
            busy.exit(Outcome::Done).unwrap();
            assert!(output(&pal).ends_with(&format!("{}\n", style::done("Done!"))));

            let busy = pal.enter().unwrap();
            busy.exit(Outcome::Failed).unwrap();
            assert!(output(&pal).ends_with(&style::fail("Failed!")));
        }

        #[test]
        fn test_early_return_leaves_failure_line() {
            fn copy(pal: &BusyPal<Vec<u8>>) -> Result<(), String> {
                let _busy = pal.enter().map_err(|e| e.to_string())?;
                std::thread::sleep(Duration::from_millis(100));
                "not a number".parse::<u32>().map_err(|e| e.to_string())?;
                Ok(())
            }

            let pal = pal(please_wait(), true);
            assert!(copy(&pal).is_err());
            let s = output(&pal);
            assert!(s.ends_with(&style::fail("Failed!")), "{:?}", s);
            assert!(!s.contains("Done!"));
        }

        #[test]
        fn test_transition_happens_once() {
            let pal = pal(please_wait(), true);
            let busy = pal.enter().unwrap();
            assert_eq!(busy.finish(Ok::<_, ()>(7)), Ok(7));
            assert_eq!(output(&pal).matches("Done!").count(), 1);
        }

        #[test]
        fn test_wrap() {
            let double = pal(please_wait(), false).wrap(|n: u32| -> Result<u32, ()> { Ok(n * 2) });
            assert_eq!(double(21).unwrap(), Ok(42));
            assert_eq!(double(4).unwrap(), Ok(8));
        }

        #[test]
        fn test_invalid_options_write_nothing() {
            let err = BusyPal::with_output(
                Options::new().delay(0.0),
                Vec::<u8>::new(),
                &FixedSession(true),
            )
            .unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    mod interactive {
        use std::time::Duration;

        use crate::{busy, Options, Skip, StyleArg};

        #[test]
        fn test_busy_on_stdout() {
            let ret = busy(
                Options::new()
                    .message("Wait 300ms")
                    .style(StyleArg::Id(21))
                    .delay(0.05)
                    .skip(Skip::Run),
                || -> Result<(), ()> {
                    std::thread::sleep(Duration::from_millis(300));
                    Ok(())
                },
            );
            assert_eq!(ret.unwrap(), Ok(()));
        }
    }
}
