use crate::head::install_page_meta;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
}

/// Page shell: applies document metadata once, then lays out the arena.
#[function_component(IndexPage)]
pub fn index_page(props: &Props) -> Html {
    use_effect_with((), |()| {
        install_page_meta();
        || {}
    });

    html! {
        <main id="main" role="main" class="min-h-screen grid place-items-center bg-background px-6 py-16">
            { props.children.clone() }
        </main>
    }
}
