use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    /// Adds the wiggle animation class while set.
    #[prop_or_default]
    pub wiggle: bool,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

#[function_component(Button)]
pub fn button(p: &Props) -> Html {
    let onclick = p.onclick.clone();
    let label = p.label.clone();
    let class = classes!(
        "btn-hero",
        "hover-scale",
        "select-none",
        "px-12",
        p.wiggle.then_some("animate-wiggle")
    );
    html! {
        <button type="button" {class} aria-label={label.clone()} {onclick}>{ label }</button>
    }
}
