//! Pointer-follow gradient behind the arena.
//!
//! The arena section carries `--x`/`--y` custom properties that the
//! `.pointer-gradient` background reads; mouse movement keeps them on the
//! cursor.

use crate::dom::js_error_message;
use web_sys::{HtmlElement, MouseEvent};

/// Client-space box of the tracked element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position within `bounds` as percentages of its width and height.
///
/// Returns `None` for a collapsed box. Positions outside the box are not
/// clamped, so the gradient centre can sit past an edge.
#[must_use]
pub fn pointer_percent(client_x: f64, client_y: f64, bounds: Bounds) -> Option<(f64, f64)> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    let x = (client_x - bounds.left) / bounds.width * 100.0;
    let y = (client_y - bounds.top) / bounds.height * 100.0;
    Some((x, y))
}

#[must_use]
pub fn css_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Move `el`'s gradient centre to the pointer in `event`.
///
/// # Errors
/// Returns the browser's message if a style property cannot be set.
pub fn track_pointer(el: &HtmlElement, event: &MouseEvent) -> Result<(), String> {
    let rect = el.get_bounding_client_rect();
    let bounds = Bounds {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    };
    let Some((x, y)) = pointer_percent(
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        bounds,
    ) else {
        return Ok(());
    };
    let style = el.style();
    style
        .set_property("--x", &css_percent(x))
        .and_then(|()| style.set_property("--y", &css_percent(y)))
        .map_err(|err| js_error_message(&err))
}
