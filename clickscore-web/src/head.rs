//! Document metadata for the page shell.
//!
//! Sets the title plus the description and canonical tags once at mount.
//! Existing tags are reused so remounting never duplicates them.

use crate::dom::{console_error, js_error_message};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub const PAGE_TITLE: &str = "Rate My Clicks — Click Score Game";
pub const PAGE_DESCRIPTION: &str =
    "Rate your clicks with silly scores and comments. Click the big button and get judged!";

const DESCRIPTION_SELECTOR: &str = "meta[name=\"description\"]";
const CANONICAL_SELECTOR: &str = "link[rel=\"canonical\"]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
}

impl PageMeta {
    /// Metadata for the index page served at `url`.
    #[must_use]
    pub fn for_url(url: &str) -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            description: PAGE_DESCRIPTION.to_string(),
            canonical: url.to_string(),
        }
    }
}

/// Write `meta` into `doc`'s head.
///
/// # Errors
/// Returns an error if the document has no `<head>` or a DOM call fails.
pub fn apply_page_meta(doc: &Document, meta: &PageMeta) -> Result<(), JsValue> {
    doc.set_title(&meta.title);

    let description = ensure_head_tag(doc, DESCRIPTION_SELECTOR, "meta", ("name", "description"))?;
    description.set_attribute("content", &meta.description)?;

    let canonical = ensure_head_tag(doc, CANONICAL_SELECTOR, "link", ("rel", "canonical"))?;
    canonical.set_attribute("href", &meta.canonical)?;
    Ok(())
}

fn ensure_head_tag(
    doc: &Document,
    selector: &str,
    tag: &str,
    (attr, value): (&str, &str),
) -> Result<Element, JsValue> {
    let head = doc
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    if let Some(existing) = head.query_selector(selector)? {
        return Ok(existing);
    }
    let created = doc.create_element(tag)?;
    created.set_attribute(attr, value)?;
    head.append_child(&created)?;
    Ok(created)
}

/// Apply the index metadata for the current location.
pub fn install_page_meta() {
    let Some(win) = web_sys::window() else {
        return;
    };
    let Some(doc) = win.document() else {
        return;
    };
    let url = win.location().href().unwrap_or_default();
    if let Err(err) = apply_page_meta(&doc, &PageMeta::for_url(&url)) {
        console_error(&format!("page metadata not applied: {}", js_error_message(&err)));
    }
}
