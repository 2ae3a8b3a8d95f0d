//! Webview panel seam
//!
//! A [`Panel`] is the UI resource a session exclusively owns: something
//! that can be foregrounded, can receive host envelopes, and can be torn
//! down. The channel-backed implementation serves the standalone
//! embedding and tests; a VSCode embedding would adapt the real webview
//! panel behind the same trait.

use apidesk_protocol::HostMessage;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Placement slot for a panel (the editor view column in the original
/// embedding). Assigned by the registry at session creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSlot(pub u32);

impl ViewSlot {
    pub fn first() -> Self {
        ViewSlot(1)
    }

    pub fn next(self) -> Self {
        ViewSlot(self.0 + 1)
    }
}

pub trait Panel: Send + Sync {
    /// Bring the panel to the foreground. Observable to the user, no data
    /// effect.
    fn reveal(&self);

    /// Deliver an envelope to the webview.
    fn post(&self, message: HostMessage);

    /// Release the underlying UI resource.
    fn dispose(&self);
}

pub trait PanelFactory: Send + Sync {
    fn create(&self, title: &str, slot: ViewSlot) -> Box<dyn Panel>;
}

/// Panel that forwards envelopes over an in-process channel.
pub struct ChannelPanel {
    title: String,
    slot: ViewSlot,
    outbound: mpsc::UnboundedSender<HostMessage>,
}

impl Panel for ChannelPanel {
    fn reveal(&self) {
        debug!(
            component = "panel",
            event = "panel.revealed",
            title = %self.title,
            slot = self.slot.0,
            "Panel brought to foreground"
        );
    }

    fn post(&self, message: HostMessage) {
        if self.outbound.send(message).is_err() {
            warn!(
                component = "panel",
                event = "panel.post.closed",
                title = %self.title,
                "Webview channel closed, envelope dropped"
            );
        }
    }

    fn dispose(&self) {
        debug!(
            component = "panel",
            event = "panel.disposed",
            title = %self.title,
            "Panel disposed"
        );
    }
}

/// Factory producing [`ChannelPanel`]s that all feed one webview channel.
pub struct ChannelPanelFactory {
    outbound: mpsc::UnboundedSender<HostMessage>,
}

impl ChannelPanelFactory {
    pub fn new(outbound: mpsc::UnboundedSender<HostMessage>) -> Self {
        Self { outbound }
    }
}

impl PanelFactory for ChannelPanelFactory {
    fn create(&self, title: &str, slot: ViewSlot) -> Box<dyn Panel> {
        Box::new(ChannelPanel {
            title: title.to_string(),
            slot,
            outbound: self.outbound.clone(),
        })
    }
}
