//! Apidesk Webview
//!
//! The sandboxed UI half of an edit session: no file system access,
//! communicating with the host exclusively through envelopes. The bridge
//! dispatches inbound messages to registered handlers; the editor session
//! state orchestrates open/save/close/generate flows around the external
//! editing surface.

pub mod bridge;
pub mod editor;
pub mod generate;
pub mod profile;

pub use bridge::UiBridge;
pub use editor::{
    attach_editor, ApiDefinition, EditorError, EditorSessionState, EditorView, GenerateStatus,
};
pub use generate::{GenerateError, GeneratorClient};
pub use profile::{EditingFeatures, EditingInfo, EditingInfoContent, GeneratorConfig};
