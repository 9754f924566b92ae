//! Synthesized click tone.
//!
//! A short triangle-wave blip played when a session starts. Audio is optional:
//! any failure is logged at debug level and otherwise ignored.

use crate::dom::{js_error_message, set_timeout_once};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

/// Envelope for the click tone, in seconds relative to the context clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEnvelope {
    pub frequency_hz: f32,
    pub start_gain: f32,
    pub peak_gain: f32,
    pub peak_at: f64,
    pub floor_gain: f32,
    pub floor_at: f64,
    pub stop_at: f64,
}

pub const CLICK_TONE: ToneEnvelope = ToneEnvelope {
    frequency_hz: 520.0,
    start_gain: 0.001,
    peak_gain: 0.05,
    peak_at: 0.01,
    floor_gain: 0.0001,
    floor_at: 0.18,
    stop_at: 0.2,
};

// Close the context after the tone has stopped.
const CONTEXT_CLOSE_MS: i32 = 300;

/// Play [`CLICK_TONE`], swallowing every failure.
pub fn play_click_tone() {
    if let Err(err) = try_play(&CLICK_TONE) {
        log::debug!("click tone skipped: {}", js_error_message(&err));
    }
}

fn try_play(tone: &ToneEnvelope) -> Result<(), JsValue> {
    let ctx = AudioContext::new()?;
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    osc.set_type(OscillatorType::Triangle);
    osc.frequency().set_value(tone.frequency_hz);
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    let t0 = ctx.current_time();
    let level = gain.gain();
    level.set_value_at_time(tone.start_gain, t0)?;
    level.exponential_ramp_to_value_at_time(tone.peak_gain, t0 + tone.peak_at)?;
    level.exponential_ramp_to_value_at_time(tone.floor_gain, t0 + tone.floor_at)?;

    osc.start_with_when(t0)?;
    osc.stop_with_when(t0 + tone.stop_at)?;

    set_timeout_once(CONTEXT_CLOSE_MS, move || {
        let _ = ctx.close();
    })?;
    Ok(())
}
