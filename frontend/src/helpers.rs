//! DOM helpers shared by the components.
//!
//! - **User Feedback**: `show_toast` injects a temporary notice at the bottom
//!   of the page. Every failure in the workbench ends up here.
//! - **Downloads**: `download_bytes` hands a byte buffer to the browser as a
//!   file through a blob URL.
//! - **Formatting**: thousands separators for counts shown in the UI.

use js_sys::{Array, Uint8Array};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, HtmlAnchorElement, HtmlElement, Url};

const TOAST_MS: u32 = 3000;

/// Shows a two-line toast (`title` in bold, then `description`) for a few
/// seconds. Text is set through `textContent`, never parsed as HTML.
pub fn show_toast(title: &str, description: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Ok(heading), Ok(text), Some(body)) = (
        document.create_element("div"),
        document.create_element("strong"),
        document.create_element("div"),
        document.body(),
    ) else {
        return;
    };

    heading.set_text_content(Some(title));
    text.set_text_content(Some(description));
    toast.append_child(&heading).ok();
    toast.append_child(&text).ok();

    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Saves `bytes` as `filename` by clicking a temporary blob link.
pub fn download_bytes(bytes: &[u8], filename: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = Array::of1(&Uint8Array::from(bytes));
    let blob = Blob::new_with_u8_array_sequence(&parts)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url)
}

pub fn format_count(n: usize) -> String {
    n.to_formatted_string(&Locale::en)
}
