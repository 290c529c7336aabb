//! Optional "clear best score" button
//!
//! Only depends on [`StorageManager::clear_storage`](crate::StorageManager::clear_storage).
//! Inside Telegram the WebApp dialogs are used, elsewhere the browser's.

use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use super::DefaultManager;

/// DOM id of the button
pub const CLEAR_BUTTON_ID: &str = "clearStorageButton";

const CONFIRM_MESSAGE: &str = "Are you sure you want to clear your best score?";
const CLEARED_MESSAGE: &str = "Your best score has been cleared.";
const CANCELLED_MESSAGE: &str = "Clearing the best score was cancelled.";

#[wasm_bindgen(inline_js = "
    function webApp() {
        return (window.Telegram && window.Telegram.WebApp) || null;
    }

    export function telegram_confirm_available() {
        const app = webApp();
        return !!(app && app.showConfirm);
    }

    export function telegram_confirm(message) {
        return new Promise((resolve) => {
            webApp().showConfirm(message, (ok) => resolve(!!ok));
        });
    }

    export function telegram_alert(message) {
        const app = webApp();
        if (app && app.showAlert) {
            app.showAlert(message);
            return true;
        }
        return false;
    }
")]
extern "C" {
    fn telegram_confirm_available() -> bool;
    fn telegram_confirm(message: &str) -> Promise;
    fn telegram_alert(message: &str) -> bool;
}

async fn confirm(message: &str) -> bool {
    if telegram_confirm_available() {
        return match JsFuture::from(telegram_confirm(message)).await {
            Ok(answer) => answer.as_bool().unwrap_or(false),
            Err(e) => {
                log::warn!("Confirm dialog failed: {:?}", e);
                false
            }
        };
    }
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn alert(message: &str) {
    if !telegram_alert(message) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

async fn on_click(manager: &DefaultManager) {
    if !confirm(CONFIRM_MESSAGE).await {
        alert(CANCELLED_MESSAGE);
        return;
    }

    manager.clear_storage().await;
    alert(CLEARED_MESSAGE);
    log::info!("Storage cleared, reloading");
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

/// Attach the click handler if the button is on the page.
/// Returns whether it was found.
pub fn install(manager: Rc<DefaultManager>) -> bool {
    let Some(button) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CLEAR_BUTTON_ID))
    else {
        return false;
    };

    let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_: web_sys::MouseEvent| {
        let manager = Rc::clone(&manager);
        spawn_local(async move {
            on_click(&manager).await;
        });
    });
    let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
    true
}
