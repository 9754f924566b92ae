#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement, MouseEvent, MouseEventInit};
use yew::Renderer;

use clickscore_core::{BEST_SCORE_KEY, BestScore, BestScoreStore, KeyValueStore};
use clickscore_web::components::ClickArena;
use clickscore_web::dom;
use clickscore_web::head::{PAGE_DESCRIPTION, PAGE_TITLE, PageMeta, apply_page_meta};
use clickscore_web::storage::LocalStorageBackend;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn fresh_root(id: &str) -> Element {
    let doc = dom::document();
    if let Some(root) = doc.get_element_by_id(id) {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create root");
    root.set_id(id);
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append root");
    root
}

fn clear_best() {
    if let Ok(storage) = dom::local_storage() {
        let _ = storage.remove_item(BEST_SCORE_KEY);
    }
}

#[wasm_bindgen_test]
fn page_meta_is_applied_without_duplicates() {
    let doc = dom::document();
    let meta = PageMeta::for_url("https://clicks.example/");
    apply_page_meta(&doc, &meta).expect("first apply");
    apply_page_meta(&doc, &meta).expect("second apply");

    assert_eq!(doc.title(), PAGE_TITLE);
    let descriptions = doc
        .query_selector_all("meta[name=\"description\"]")
        .expect("query description");
    assert_eq!(descriptions.length(), 1);
    let description = doc
        .query_selector("meta[name=\"description\"]")
        .expect("query")
        .expect("description tag");
    assert_eq!(
        description.get_attribute("content").as_deref(),
        Some(PAGE_DESCRIPTION)
    );

    let canonicals = doc
        .query_selector_all("link[rel=\"canonical\"]")
        .expect("query canonical");
    assert_eq!(canonicals.length(), 1);
    let canonical = doc
        .query_selector("link[rel=\"canonical\"]")
        .expect("query")
        .expect("canonical tag");
    assert_eq!(
        canonical.get_attribute("href").as_deref(),
        Some("https://clicks.example/")
    );
}

#[wasm_bindgen_test]
fn local_storage_backend_round_trips_best_score() {
    clear_best();
    assert_eq!(BestScore::load(LocalStorageBackend).read(), None);

    let mut best = BestScore::load(LocalStorageBackend);
    best.update(41);
    best.update(17);
    assert_eq!(
        LocalStorageBackend.get(BEST_SCORE_KEY).expect("readable"),
        Some("41".to_string())
    );
    assert_eq!(BestScore::load(LocalStorageBackend).read(), Some(41));
    clear_best();
}

#[wasm_bindgen_test]
async fn clicking_runs_analysis_and_shows_score() {
    clear_best();
    let root = fresh_root("arena");
    Renderer::<ClickArena>::with_root(root.clone()).render();
    dom::sleep_ms(20).await.expect("render tick");

    let button: HtmlElement = root
        .query_selector("button[aria-label='Click Me']")
        .expect("query button")
        .expect("button exists")
        .dyn_into()
        .expect("html element");
    button.click();
    dom::sleep_ms(50).await.expect("first frames");
    assert!(
        root.inner_html().contains("Analyzing your click"),
        "progress visible while running"
    );

    // A second click mid-run must not restart the session.
    button.click();
    dom::sleep_ms(1_000).await.expect("analysis finishes");

    let html = root.inner_html();
    assert!(html.contains("/100"), "score rendered: {html}");
    assert!(html.contains("Best score on this device"));
    assert!(!html.contains("Analyzing your click"));
    assert!(!html.contains("animate-wiggle"), "wiggle clears itself");
    assert!(BestScore::load(LocalStorageBackend).read().is_some());
    clear_best();
}

#[wasm_bindgen_test]
async fn pointer_movement_moves_gradient_centre() {
    let root = fresh_root("arena-pointer");
    Renderer::<ClickArena>::with_root(root.clone()).render();
    dom::sleep_ms(20).await.expect("render tick");

    let section: HtmlElement = root
        .query_selector("section[aria-label='Rate My Clicks Arena']")
        .expect("query section")
        .expect("section exists")
        .dyn_into()
        .expect("html element");
    let rect = section.get_bounding_client_rect();
    assert!(rect.width() > 0.0 && rect.height() > 0.0, "arena has layout");

    let init = MouseEventInit::new();
    init.set_bubbles(true);
    #[allow(clippy::cast_possible_truncation)]
    {
        init.set_client_x((rect.left() + rect.width() / 2.0) as i32);
        init.set_client_y((rect.top() + rect.height() / 2.0) as i32);
    }
    let event =
        MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).expect("mouse event");
    section.dispatch_event(&event).expect("dispatch");

    let style = section.style();
    let x = style.get_property_value("--x").expect("read --x");
    let y = style.get_property_value("--y").expect("read --y");
    assert!(x.ends_with('%'), "--x set: {x:?}");
    assert!(y.ends_with('%'), "--y set: {y:?}");
    let x_value: f64 = x.trim_end_matches('%').trim().parse().expect("numeric --x");
    assert!((40.0..=60.0).contains(&x_value), "centred pointer: {x_value}");
}
