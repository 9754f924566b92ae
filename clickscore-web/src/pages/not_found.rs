use yew::prelude::*;

/// Not-found page to show when routing fails to match a known view.
#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_go_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    let go_home = {
        let cb = props.on_go_home.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <main id="main" role="main" class="min-h-screen grid place-items-center not-found" aria-live="assertive">
            <section class="text-center space-y-4">
                <h1 class="font-display text-4xl">{ "404" }</h1>
                <p class="text-muted-foreground">{ "Oops! Page not found" }</p>
                <button type="button" class="btn-hero" onclick={go_home}>
                    { "Return to Home" }
                </button>
            </section>
        </main>
    }
}
