//! Frame scheduling abstraction.
//!
//! Browsers deliver frames through `requestAnimationFrame`; tests and the
//! tester use [`ManualFrames`] to step a simulated clock instead.

use std::cell::{Cell, RefCell};
use std::fmt;

/// One-shot callback receiving the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host primitive that runs a callback on the next frame.
pub trait FrameScheduler {
    /// Current time on the same clock frame timestamps use.
    fn now(&self) -> f64;

    /// Run `callback` once on the next frame.
    fn request_frame(&self, callback: FrameCallback);
}

/// Deterministic scheduler with a hand-driven clock.
#[derive(Default)]
pub struct ManualFrames {
    now: Cell<f64>,
    queue: RefCell<Vec<FrameCallback>>,
    delivered: Cell<usize>,
}

impl fmt::Debug for ManualFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualFrames")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .field("delivered", &self.delivered.get())
            .finish()
    }
}

impl ManualFrames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(now: f64) -> Self {
        let frames = Self::default();
        frames.now.set(now);
        frames
    }

    /// Callbacks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Total callbacks run so far.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.delivered.get()
    }

    /// Advance the clock by `ms` and deliver one frame.
    ///
    /// Only callbacks queued before the call run; anything they request waits
    /// for the following frame, matching browser semantics.
    pub fn advance(&self, ms: f64) -> usize {
        let timestamp = self.now.get() + ms;
        self.now.set(timestamp);
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let count = due.len();
        for callback in due {
            callback(timestamp);
        }
        self.delivered.set(self.delivered.get() + count);
        count
    }

    /// Deliver frames every `frame_ms` until nothing is queued or `max_frames` is hit.
    /// Returns the number of frames stepped.
    pub fn run_until_idle(&self, frame_ms: f64, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.pending() > 0 && frames < max_frames {
            self.advance(frame_ms);
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualFrames {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn request_frame(&self, callback: FrameCallback) {
        self.queue.borrow_mut().push(callback);
    }
}
