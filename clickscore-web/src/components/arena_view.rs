//! Stateless rendering of the click arena.
//!
//! Everything visible is derived from a [`SessionSnapshot`], so the same view
//! renders in the browser and under server-side rendering in tests.

use super::button::Button;
use clickscore_core::{ClickResult, SessionSnapshot, SessionState};
use yew::prelude::*;

pub const ARENA_TITLE: &str = "Rate My Clicks";
pub const ARENA_TAGLINE: &str =
    "One big button. Infinite judgement. Click to get your totally scientific score.";
pub const CLICK_LABEL: &str = "Click Me";
pub const ANALYZING_LABEL: &str = "Analyzing your click…";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub snapshot: SessionSnapshot,
    #[prop_or_default]
    pub wiggle: bool,
    #[prop_or_default]
    pub on_click: Callback<MouseEvent>,
    /// Section element carrying the gradient's `--x`/`--y` properties.
    #[prop_or_default]
    pub container: NodeRef,
    #[prop_or_default]
    pub on_pointer_move: Callback<MouseEvent>,
}

#[function_component(ArenaView)]
pub fn arena_view(p: &Props) -> Html {
    let state = &p.snapshot.state;
    html! {
        <section
            ref={p.container.clone()}
            aria-label="Rate My Clicks Arena"
            class="relative"
            onmousemove={p.on_pointer_move.clone()}
        >
            <div class="pointer-gradient" aria-hidden="true"></div>
            <div class="relative z-10 mx-auto max-w-2xl text-center space-y-6 animate-enter">
                <h1 class="font-display text-5xl sm:text-6xl tracking-wide bg-gradient-to-r from-primary to-accent bg-clip-text text-transparent">
                    { ARENA_TITLE }
                </h1>
                <p class="text-muted-foreground max-w-prose mx-auto">{ ARENA_TAGLINE }</p>

                <div class="flex items-center justify-center">
                    <Button
                        label={AttrValue::from(CLICK_LABEL)}
                        wiggle={p.wiggle}
                        onclick={p.on_click.clone()}
                    />
                </div>

                { render_progress(state) }
                { state.result().map_or_else(Html::default, |result| render_result(result, p.snapshot.best)) }
            </div>
        </section>
    }
}

fn render_progress(state: &SessionState) -> Html {
    let SessionState::Running { progress } = state else {
        return Html::default();
    };
    let value = progress.to_string();
    html! {
        <div class="space-y-2 analysis-progress">
            <p class="text-sm text-muted-foreground">{ ANALYZING_LABEL }</p>
            <progress
                class="progress h-3 w-full"
                value={value.clone()}
                max="100"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow={value.clone()}
            />
        </div>
    }
}

fn render_result(result: &ClickResult, best: Option<u8>) -> Html {
    html! {
        <div class="space-y-3 animate-enter click-result" aria-live="polite">
            <p class="text-lg text-muted-foreground">{ "Your click score" }</p>
            <div class="font-display text-6xl sm:text-7xl score-value">
                { format!("{}/100", result.score) }
            </div>
            <p class="font-fun text-xl verdict">{ result.headline() }</p>
            if let Some(best) = best {
                <p class="text-sm text-muted-foreground best-score">
                    { "Best score on this device: " }
                    <span class="font-medium">{ best }</span>
                </p>
            }
            <p class="text-sm text-muted-foreground fun-fact">{ result.fact }</p>
        </div>
    }
}
