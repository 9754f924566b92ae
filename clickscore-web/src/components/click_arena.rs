//! Interactive arena: owns the session controller for this page view.

use super::arena_view::ArenaView;
use crate::audio::play_click_tone;
use crate::dom::{entropy_seed, set_timeout_once};
use crate::frames::AnimationFrames;
use crate::pointer::track_pointer;
use crate::storage::LocalStorageBackend;
use clickscore_core::{
    ClickFeedback, Observer, SessionSnapshot, Trigger, WIGGLE_MS, seeded_controller, start_analysis,
};
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

/// Tone plus a self-clearing wiggle on the button.
struct BrowserFeedback {
    wiggle: UseStateHandle<bool>,
}

impl ClickFeedback for BrowserFeedback {
    fn play_tone(&self) {
        play_click_tone();
    }

    fn pulse(&self) {
        self.wiggle.set(true);
        let wiggle = self.wiggle.clone();
        let delay = i32::try_from(WIGGLE_MS).unwrap_or(i32::MAX);
        if set_timeout_once(delay, move || wiggle.set(false)).is_err() {
            self.wiggle.set(false);
        }
    }
}

#[function_component(ClickArena)]
pub fn click_arena() -> Html {
    let controller = use_mut_ref(|| seeded_controller(LocalStorageBackend, entropy_seed()));
    let snapshot = use_state({
        let controller = controller.clone();
        move || controller.borrow().snapshot()
    });
    let wiggle = use_state(|| false);
    let scheduler = use_memo((), |()| AnimationFrames);
    let container = use_node_ref();

    let on_pointer_move = {
        let container = container.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(el) = container.cast::<HtmlElement>() else {
                return;
            };
            if let Err(err) = track_pointer(&el, &event) {
                log::debug!("pointer gradient not updated: {err}");
            }
        })
    };

    let on_click = {
        let controller = controller.clone();
        let snapshot = snapshot.clone();
        let wiggle = wiggle.clone();
        Callback::from(move |_: MouseEvent| {
            let sink = snapshot.clone();
            let observer: Observer = Rc::new(move |snap: &SessionSnapshot| sink.set(snap.clone()));
            let feedback = BrowserFeedback {
                wiggle: wiggle.clone(),
            };
            if start_analysis(&controller, &scheduler, &feedback, &observer) == Trigger::Ignored {
                log::debug!("click ignored while analysis is running");
            }
        })
    };

    html! {
        <ArenaView
            snapshot={(*snapshot).clone()}
            wiggle={*wiggle}
            {on_click}
            {container}
            {on_pointer_move}
        />
    }
}
