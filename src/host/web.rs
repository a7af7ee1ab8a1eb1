//! Browser host bridge: `window.parent.postMessage({ type: "GAME_LOADED" }, "*")`

use wasm_bindgen::JsValue;

use super::{HostBridge, READY_MESSAGE_TYPE};

#[derive(Debug, Default)]
pub struct WebBridge {
    notified: bool,
}

impl WebBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HostBridge for WebBridge {
    fn notify_ready(&mut self) {
        if self.notified {
            return;
        }
        self.notified = true;

        let Some(parent) = web_sys::window().and_then(|w| w.parent().ok().flatten()) else {
            log::info!("No parent frame, skipping ready message");
            return;
        };

        let message = js_sys::Object::new();
        if js_sys::Reflect::set(
            &message,
            &JsValue::from_str("type"),
            &JsValue::from_str(READY_MESSAGE_TYPE),
        )
        .is_err()
        {
            log::warn!("Failed to build ready message");
            return;
        }

        match parent.post_message(&message, "*") {
            Ok(()) => log::info!("Bridge initialized - ready message posted"),
            Err(e) => log::warn!("Ready message failed: {:?}", e),
        }
    }
}
