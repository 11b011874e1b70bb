//! Browser helpers shared by the console pages.
//!
//! - **User feedback**: toast notices injected into the DOM.
//! - **Dirty tracking**: MD5 fingerprints and the global `app_dirty` flag that
//!   the page's `beforeunload` handler reads.
//! - **Inputs**: reading values and picked files out of DOM events.

use crm_common::model::file::FileHandle;
use crm_common::model::notice::{Notice, NoticeLevel};
use gloo_file::futures::read_as_bytes;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Displays a temporary notification at the bottom of the screen.
///
/// The toast removes itself after a few seconds. Errors stay a little longer
/// and are tinted red so they are not mistaken for confirmations. The message
/// is set as text content, never as HTML.
///
/// # Arguments
/// * `message` - The text to display. Newlines are kept (`white-space: pre-line`).
/// * `level` - Picks the background colour and how long the toast stays.
pub fn show_toast(message: &str, level: NoticeLevel) {
    let (background, millis) = match level {
        NoticeLevel::Info => ("rgba(0, 0, 0, 0.8)", 3000),
        NoticeLevel::Success => ("rgba(27, 94, 32, 0.9)", 3000),
        NoticeLevel::Error => ("rgba(183, 28, 28, 0.92)", 5000),
    };

    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", background).ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("white-space", "pre-line").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(millis).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Shows a `Notice` produced by the onboarding session as a toast. Errors are
/// also written to the browser console.
pub fn show_notice(notice: &Notice) {
    if notice.level == NoticeLevel::Error {
        gloo_console::error!(notice.message.clone());
    }
    show_toast(&notice.message, notice.level);
}

/// Computes the hex MD5 digest of a string.
///
/// Used by the onboarding component (see `components/onboarding/helpers.rs`)
/// to compare the current form against its fingerprint at the last
/// successful submission.
///
/// # Arguments
/// * `input` - The fingerprint text.
///
/// # Returns
/// The 32-character lowercase hex digest.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Publishes the unsaved-changes flag as `window.app_dirty`.
///
/// The `beforeunload` handler in `index.html` reads this flag to warn before
/// the page is left with an unsubmitted form.
///
/// # Arguments
/// * `dirty` - `true` while the form differs from its saved fingerprint.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}

/// Reads a picked browser file fully into memory.
///
/// # Arguments
/// * `file` - The file taken from an `<input type="file">` change event.
///
/// # Returns
/// A `FileHandle` with a fresh id, or a user-facing message when the browser
/// could not read the file.
pub async fn read_file(file: web_sys::File) -> Result<FileHandle, String> {
    let file = gloo_file::File::from(file);
    let bytes = read_as_bytes(&file)
        .await
        .map_err(|e| format!("Could not read {}: {e}", file.name()))?;
    Ok(FileHandle::new(file.name(), file.raw_mime_type(), bytes))
}

/// Current value of the input, select or textarea that fired `event`.
///
/// # Returns
/// The element's value, or an empty string for any other target.
pub fn event_value(event: &Event) -> String {
    let Some(target) = event.target() else {
        return String::new();
    };
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn event_checked(event: &Event) -> bool {
    event
        .target_dyn_into::<HtmlInputElement>()
        .is_some_and(|input| input.checked())
}

/// First file of a file input's change event. The input is reset so picking
/// the same file again fires another change.
pub fn event_file(event: &Event) -> Option<web_sys::File> {
    let input = event.target_dyn_into::<HtmlInputElement>()?;
    let file = input.files()?.get(0);
    input.set_value("");
    file
}
