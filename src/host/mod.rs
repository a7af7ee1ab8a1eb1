//! Host page integration
//!
//! The game may run inside an iframe. At startup it tells the embedding page
//! it is ready; nothing is expected back.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Message type posted to the parent frame once the game has loaded
pub const READY_MESSAGE_TYPE: &str = "GAME_LOADED";

/// Outbound notifications to whatever is hosting the game
pub trait HostBridge {
    /// Fire-and-forget "ready" signal. No retry, no response.
    fn notify_ready(&mut self);
}

/// Bridge for hosts with no page to talk to (native, tests)
#[derive(Debug, Default)]
pub struct LogBridge {
    notified: bool,
}

impl LogBridge {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn notified(&self) -> bool {
        self.notified
    }
}

impl HostBridge for LogBridge {
    fn notify_ready(&mut self) {
        if self.notified {
            return;
        }
        self.notified = true;
        log::info!("Host bridge initialized ({})", READY_MESSAGE_TYPE);
    }
}
