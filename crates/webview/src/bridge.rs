//! UI bridge
//!
//! Webview-side transport: reconstructs envelopes from transport events,
//! dispatches them to type-keyed handlers, and forwards outgoing
//! envelopes to the host. Dispatch is synchronous and single-threaded:
//! the platform delivers one message at a time, and a handler must not
//! block the loop.

use std::collections::HashMap;

use apidesk_protocol::{HostMessage, HostMessageKind, UiMessage};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub type MessageHandler = Box<dyn FnMut(&HostMessage)>;

pub struct UiBridge {
    outbound: mpsc::UnboundedSender<UiMessage>,
    handlers: HashMap<HostMessageKind, Vec<MessageHandler>>,
    workspace_path: Option<String>,
}

impl UiBridge {
    pub fn new(outbound: mpsc::UnboundedSender<UiMessage>) -> Self {
        Self {
            outbound,
            handlers: HashMap::new(),
            workspace_path: None,
        }
    }

    /// Register a handler for one message kind. Multiple handlers per
    /// kind are permitted; invocation order is registration order.
    pub fn add_message_handler(
        &mut self,
        kind: HostMessageKind,
        handler: impl FnMut(&HostMessage) + 'static,
    ) {
        self.handlers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Dispatch one inbound envelope: record its workspace path as
    /// latest-known, then invoke every registered handler for its kind.
    /// An envelope nobody registered for is logged and dropped.
    pub fn dispatch(&mut self, message: HostMessage) {
        debug!(
            component = "ui_bridge",
            event = "bridge.message.received",
            kind = ?message.kind(),
            "Incoming envelope"
        );

        if let Some(path) = message.workspace_path() {
            self.workspace_path = Some(path.to_string());
        }

        match self.handlers.get_mut(&message.kind()) {
            Some(handlers) if !handlers.is_empty() => {
                for handler in handlers.iter_mut() {
                    handler(&message);
                }
            }
            _ => {
                warn!(
                    component = "ui_bridge",
                    event = "bridge.message.unhandled",
                    kind = ?message.kind(),
                    "Unhandled message"
                );
            }
        }
    }

    /// Forward an envelope to the host transport without transformation.
    pub fn send_message(&self, message: UiMessage) {
        if self.outbound.send(message).is_err() {
            warn!(
                component = "ui_bridge",
                event = "bridge.send.closed",
                "Host transport closed, envelope dropped"
            );
        }
    }

    /// Announce that the webview finished booting.
    pub fn ready(&self) {
        self.send_message(UiMessage::Ready);
    }

    /// The workspace path from the most recent envelope that carried one.
    pub fn workspace_path(&self) -> Option<&str> {
        self.workspace_path.as_deref()
    }
}
