//! Cycling through the animated frames of a frame set.

use owo_colors::Style;

use crate::{style::paint, FrameSet};

/// Endless cycle over the animated frames of a [`FrameSet`], each frame styled.
///
/// The failure and success glyphs are never yielded, [`Iterator::next`] never returns `None`.
///
/// ```rust
/// use busypal::{FrameSet, SpinnerStream};
///
/// let frames = FrameSet::from_glyphs("ab✘✔").unwrap();
/// let cycle: Vec<String> = SpinnerStream::new(frames, None).take(3).collect();
/// assert_eq!(cycle, ["a", "b", "a"]);
/// ```
#[derive(Debug, Clone)]
pub struct SpinnerStream {
    frames: FrameSet,
    style: Option<Style>,
    index: usize,
}

impl SpinnerStream {
    /// Create a stream starting at the first animated frame.
    pub fn new(frames: FrameSet, style: Option<Style>) -> Self {
        Self {
            frames,
            style,
            index: 0,
        }
    }

    /// Get the next styled frame.
    pub fn next_frame(&mut self) -> String {
        let animated = self.frames.animated();
        let frame = paint(&animated[self.index], self.style.as_ref());
        self.index = (self.index + 1) % animated.len();
        frame
    }

    /// Restart the cycle from the first animated frame.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl Iterator for SpinnerStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_frame())
    }
}
