//! User Notifications and Labels
//!
//! The host MES page owns the message area and the translations; when the
//! dashboard runs outside it, notifications fall back to in-page toasts and
//! labels to their keys.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::store::{show_toast, DashboardStore};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "parent"], js_name = addMessage)]
    fn parent_add_message(message: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = QCD, js_name = translate)]
    fn qcd_translate(key: &str) -> Result<JsValue, JsValue>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Failure,
}

/// Message shape expected by the host page's `addMessage`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub content: String,
    pub auto_close: bool,
    pub extra_large: bool,
}

impl Notification {
    pub fn failure(title: String, content: String, auto_close: bool) -> Self {
        Self {
            severity: Severity::Failure,
            title,
            content,
            auto_close,
            extra_large: false,
        }
    }
}

/// Fire-and-forget user notification
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Label lookup; never fails
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

/// Posts to `window.parent.addMessage`, toasts otherwise
#[derive(Clone, Copy)]
pub struct HostNotifier {
    store: DashboardStore,
}

impl HostNotifier {
    pub fn new(store: DashboardStore) -> Self {
        Self { store }
    }
}

impl Notifier for HostNotifier {
    fn notify(&self, notification: Notification) {
        match serde_wasm_bindgen::to_value(&notification) {
            Ok(payload) => match parent_add_message(payload) {
                Ok(()) => return,
                Err(e) => log::debug!("host message area unavailable: {:?}", e),
            },
            Err(e) => log::warn!("notification not serializable: {}", e),
        }
        show_toast(self.store, notification);
    }
}

/// Uses `QCD.translate` from the host page when present
#[derive(Clone, Copy, Default)]
pub struct HostTranslator;

impl Translator for HostTranslator {
    fn translate(&self, key: &str) -> String {
        qcd_translate(key)
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_else(|| key.to_string())
    }
}
