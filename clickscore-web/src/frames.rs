//! `requestAnimationFrame` scheduler.

use crate::dom::{console_error, js_error_message, performance_now, set_timeout_once};
use clickscore_core::{FrameCallback, FrameScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Timer delay used when the animation-frame queue refuses a callback.
pub const FALLBACK_FRAME_MS: i32 = 16;

/// Delivers frames through the browser's animation-frame queue, falling back
/// to a timer stamped with `performance.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrames;

impl FrameScheduler for AnimationFrames {
    fn now(&self) -> f64 {
        performance_now()
    }

    fn request_frame(&self, callback: FrameCallback) {
        let scheduled = request_with_fallback(callback, request_animation_frame, |callback| {
            set_timeout_once(FALLBACK_FRAME_MS, move || callback(performance_now()))
                .map(drop)
                .map_err(|err| js_error_message(&err))
        });
        if let Err(reason) = scheduled {
            console_error(&format!("frame not scheduled: {reason}"));
        }
    }
}

fn request_animation_frame(callback: FrameCallback) -> Result<(), String> {
    let win = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let js_callback = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
    win.request_animation_frame(js_callback.unchecked_ref())
        .map(drop)
        .map_err(|err| js_error_message(&err))
}

/// Hand `callback` to `primary`; if it refuses, hand it to `fallback` instead.
///
/// Both paths share one slot, so the callback runs at most once.
fn request_with_fallback<P, F>(
    callback: FrameCallback,
    primary: P,
    fallback: F,
) -> Result<(), String>
where
    P: FnOnce(FrameCallback) -> Result<(), String>,
    F: FnOnce(FrameCallback) -> Result<(), String>,
{
    let slot = Rc::new(RefCell::new(Some(callback)));
    let Err(reason) = primary(shared(&slot)) else {
        return Ok(());
    };
    log::warn!("requestAnimationFrame failed, using a timer: {reason}");
    fallback(shared(&slot))
}

fn shared(slot: &Rc<RefCell<Option<FrameCallback>>>) -> FrameCallback {
    let slot = Rc::clone(slot);
    Box::new(move |timestamp| {
        let callback = slot.borrow_mut().take();
        if let Some(callback) = callback {
            callback(timestamp);
        }
    })
}
