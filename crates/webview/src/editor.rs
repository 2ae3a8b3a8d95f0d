//! Editor session state
//!
//! Holds the currently open document, its encoding, and the editing
//! configuration, and orchestrates the open/save/close/generate flows.
//! The actual editing surface is an external capability; this state is
//! what it renders from and writes back into.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use apidesk_protocol::codec::{self, CodecError, Encoding};
use apidesk_protocol::{
    ChangePayload, EditBroadcast, EditorProfile, HostMessage, HostMessageKind, ReferenceRecord,
    UiMessage,
};

use crate::bridge::UiBridge;
use crate::profile::EditingInfo;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no document is open")]
    NoDocument,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Which surface the webview is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorView {
    Loading,
    Editor,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// The edit-session object built when a document opens.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDefinition {
    pub id: String,
    pub created_by: String,
    pub created_on: u64,
    pub tags: Vec<String>,
    pub description: String,
    pub definition_type: String,
    pub spec: Option<Value>,
}

impl ApiDefinition {
    fn fresh() -> Self {
        Self {
            id: "api-1".to_string(),
            created_by: "user".to_string(),
            created_on: unix_now(),
            tags: Vec::new(),
            description: String::new(),
            definition_type: "OpenAPI30".to_string(),
            spec: None,
        }
    }
}

pub struct EditorSessionState {
    api: Option<ApiDefinition>,
    encoding: Encoding,
    ext_refs: Vec<ReferenceRecord>,
    profile: EditorProfile,
    editing: EditingInfo,
    view: EditorView,
    save_in_flight: bool,
    close_after_save: bool,
    generate_status: GenerateStatus,
    generate_error: Option<String>,
}

impl Default for EditorSessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSessionState {
    pub fn new() -> Self {
        Self {
            api: None,
            encoding: Encoding::Json,
            ext_refs: Vec::new(),
            profile: EditorProfile::OpenApi,
            editing: EditingInfo::for_profile(EditorProfile::OpenApi),
            view: EditorView::Loading,
            save_in_flight: false,
            close_after_save: false,
            generate_status: GenerateStatus::Idle,
            generate_error: None,
        }
    }

    pub fn api(&self) -> Option<&ApiDefinition> {
        self.api.as_ref()
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn ext_refs(&self) -> &[ReferenceRecord] {
        &self.ext_refs
    }

    pub fn profile(&self) -> EditorProfile {
        self.profile
    }

    pub fn editing(&self) -> &EditingInfo {
        &self.editing
    }

    pub fn view(&self) -> EditorView {
        self.view
    }

    pub fn save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    pub fn generate_status(&self) -> GenerateStatus {
        self.generate_status
    }

    pub fn generate_error(&self) -> Option<&str> {
        self.generate_error.as_deref()
    }

    /// Populate the session from an `open` envelope payload. The parse
    /// priority is structured passthrough, then JSON, then YAML; if all
    /// fail the document stays unset and the view shows the error state.
    /// The editing profile is sniffed here, once, and not re-evaluated.
    pub fn open(&mut self, data: Value, ext_refs: Vec<ReferenceRecord>) {
        let mut api = ApiDefinition::fresh();

        match codec::parse_payload(&data) {
            Some((spec, encoding)) => {
                self.encoding = encoding;
                self.profile = codec::sniff_profile(&spec);
                api.spec = Some(spec);
                self.view = EditorView::Editor;
            }
            None => {
                warn!(
                    component = "editor",
                    event = "editor.parse_failed",
                    "Failed to parse content"
                );
                self.view = EditorView::Error;
            }
        }

        self.editing = EditingInfo::for_profile(self.profile);
        self.ext_refs = ext_refs;
        self.api = Some(api);
    }

    /// Replace the document with the editing surface's current value.
    pub fn edit(&mut self, new_spec: Value) {
        match &mut self.api {
            Some(api) => api.spec = Some(new_spec),
            None => {
                warn!(
                    component = "editor",
                    event = "editor.edit_without_document",
                    "Edit received with no open document"
                );
            }
        }
    }

    fn current_spec(&self) -> Option<&Value> {
        self.api.as_ref().and_then(|api| api.spec.as_ref())
    }

    /// Serialize the document in the encoding recorded at open time.
    pub fn serialize_for_save(&self) -> Result<String, EditorError> {
        let spec = self.current_spec().ok_or(EditorError::NoDocument)?;
        Ok(codec::serialize(spec, self.encoding)?)
    }

    /// Build the `save-req` envelope and mark the save pending until the
    /// host's `save-res` arrives.
    pub fn request_save(&mut self) -> Result<UiMessage, EditorError> {
        let data = self.serialize_for_save()?;
        self.save_in_flight = true;
        Ok(UiMessage::SaveReq { data })
    }

    /// Like [`request_save`](Self::request_save), but the session closes
    /// once the host confirms the write.
    pub fn request_save_and_close(&mut self) -> Result<UiMessage, EditorError> {
        let message = self.request_save()?;
        self.close_after_save = true;
        Ok(message)
    }

    /// The host confirmed the write.
    pub fn handle_save_res(&mut self) {
        if !self.save_in_flight {
            debug!(
                component = "editor",
                event = "editor.save_res.unexpected",
                "save-res with no save pending"
            );
        }
        self.save_in_flight = false;
        if self.close_after_save {
            self.close_after_save = false;
            self.close();
        }
    }

    /// Discard the open document and return to the idle surface.
    pub fn close(&mut self) {
        self.api = None;
        self.ext_refs.clear();
        self.save_in_flight = false;
        self.close_after_save = false;
        self.view = EditorView::Loading;
    }

    /// Live-edit broadcast for the embedding frame.
    pub fn document_changed(&self) -> Option<EditBroadcast> {
        let spec = self.current_spec()?;
        Some(EditBroadcast::Change {
            data: ChangePayload {
                content: spec.clone(),
            },
        })
    }

    /// Serialize for the generator: always pretty JSON, whatever the
    /// file's own encoding.
    pub fn begin_generate(&mut self) -> Result<String, EditorError> {
        let spec = self.current_spec().ok_or(EditorError::NoDocument)?;
        let data = codec::to_pretty_json(spec)?;
        self.generate_status = GenerateStatus::Running;
        self.generate_error = None;
        Ok(data)
    }

    /// Record the generator's outcome. Failure is non-fatal and keeps the
    /// document open.
    pub fn finish_generate(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.generate_status = GenerateStatus::Succeeded,
            Err(message) => {
                warn!(
                    component = "editor",
                    event = "editor.generate.failed",
                    error = %message,
                    "Project generation failed"
                );
                self.generate_status = GenerateStatus::Failed;
                self.generate_error = Some(message);
            }
        }
    }
}

/// Wire an editor session into a bridge: `open` populates the state,
/// `save-res` completes pending saves.
pub fn attach_editor(bridge: &mut UiBridge, state: Rc<RefCell<EditorSessionState>>) {
    let open_state = Rc::clone(&state);
    bridge.add_message_handler(HostMessageKind::Open, move |message| {
        if let HostMessage::Open { data, ext_refs, .. } = message {
            open_state
                .borrow_mut()
                .open(Value::String(data.clone()), ext_refs.clone());
        }
    });

    bridge.add_message_handler(HostMessageKind::SaveRes, move |message| {
        if let HostMessage::SaveRes = message {
            state.borrow_mut().handle_save_res();
        }
    });
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn openapi_text() -> String {
        r#"{"openapi": "3.0.2", "info": {"title": "Demo API", "version": "1.0.0"}, "paths": {}}"#
            .to_string()
    }

    #[test]
    fn open_json_selects_openapi_profile_and_json_encoding() {
        let mut state = EditorSessionState::new();
        let refs = vec![ReferenceRecord {
            path: "./pet.json".to_string(),
            content: "{}".to_string(),
        }];

        state.open(Value::String(openapi_text()), refs);

        assert_eq!(state.encoding(), Encoding::Json);
        assert_eq!(state.profile(), EditorProfile::OpenApi);
        assert_eq!(state.view(), EditorView::Editor);
        assert_eq!(state.ext_refs().len(), 1);

        let api = state.api().expect("edit session object");
        assert_eq!(api.id, "api-1");
        assert_eq!(api.created_by, "user");
        assert_eq!(api.spec.as_ref().expect("spec")["openapi"], "3.0.2");
    }

    #[test]
    fn open_asyncapi_switches_editing_profile() {
        let mut state = EditorSessionState::new();
        state.open(
            Value::String(r#"{"asyncapi": "2.0.0", "info": {"title": "DEMO API"}}"#.to_string()),
            Vec::new(),
        );

        assert_eq!(state.profile(), EditorProfile::AsyncApi);
        assert_eq!(state.editing().content.profile, EditorProfile::AsyncApi);
    }

    #[test]
    fn open_yaml_records_yaml_encoding_and_saves_roundtrip() {
        let mut state = EditorSessionState::new();
        state.open(
            Value::String("asyncapi: 2.0.0\ninfo:\n    title: DEMO API\n".to_string()),
            Vec::new(),
        );

        assert_eq!(state.encoding(), Encoding::Yaml);

        let saved = state.serialize_for_save().expect("serialize");
        let (reparsed, _) = codec::parse_text(&saved).expect("reparse saved text");
        assert_eq!(
            reparsed,
            json!({"asyncapi": "2.0.0", "info": {"title": "DEMO API"}})
        );
    }

    #[test]
    fn structured_payload_passes_through_as_json() {
        let mut state = EditorSessionState::new();
        state.open(json!({"openapi": "3.0.2"}), Vec::new());

        assert_eq!(state.encoding(), Encoding::Json);
        assert_eq!(state.view(), EditorView::Editor);
    }

    #[test]
    fn unparseable_content_degrades_without_crashing() {
        let mut state = EditorSessionState::new();
        state.open(Value::String("{\"unterminated\": [".to_string()), Vec::new());

        assert_eq!(state.view(), EditorView::Error);
        let api = state.api().expect("edit session object");
        assert!(api.spec.is_none());
        assert!(matches!(
            state.serialize_for_save(),
            Err(EditorError::NoDocument)
        ));
    }

    #[test]
    fn save_is_pending_until_save_res() {
        let mut state = EditorSessionState::new();
        state.open(Value::String(openapi_text()), Vec::new());

        let message = state.request_save().expect("save request");
        match &message {
            UiMessage::SaveReq { data } => {
                // Serialized with the 4-space indent the host writes verbatim.
                assert!(data.contains("\n    \"info\""));
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert!(state.save_in_flight());

        state.handle_save_res();
        assert!(!state.save_in_flight());
        assert!(state.api().is_some());
    }

    #[test]
    fn save_and_close_waits_for_the_response() {
        let mut state = EditorSessionState::new();
        state.open(Value::String(openapi_text()), Vec::new());

        state.request_save_and_close().expect("save request");
        assert!(state.api().is_some());

        state.handle_save_res();
        assert!(state.api().is_none());
        assert_eq!(state.view(), EditorView::Loading);
        assert!(state.ext_refs().is_empty());
    }

    #[test]
    fn generate_uses_json_even_for_yaml_documents() {
        let mut state = EditorSessionState::new();
        state.open(
            Value::String("openapi: 3.0.2\ninfo:\n    title: Demo\n".to_string()),
            Vec::new(),
        );
        assert_eq!(state.encoding(), Encoding::Yaml);

        let payload = state.begin_generate().expect("generate payload");
        serde_json::from_str::<Value>(&payload).expect("payload is JSON");
        assert_eq!(state.generate_status(), GenerateStatus::Running);
    }

    #[test]
    fn generate_failure_keeps_the_document_open() {
        let mut state = EditorSessionState::new();
        state.open(Value::String(openapi_text()), Vec::new());

        state.begin_generate().expect("generate payload");
        state.finish_generate(Err("connection refused".to_string()));

        assert_eq!(state.generate_status(), GenerateStatus::Failed);
        assert_eq!(state.generate_error(), Some("connection refused"));
        assert!(state.api().is_some());
        assert_eq!(state.view(), EditorView::Editor);
    }

    #[test]
    fn document_changed_broadcasts_current_spec() {
        let mut state = EditorSessionState::new();
        state.open(Value::String(openapi_text()), Vec::new());
        state.edit(json!({"openapi": "3.0.2", "paths": {"/pets": {}}}));

        match state.document_changed().expect("broadcast") {
            EditBroadcast::Change { data } => {
                assert_eq!(data.content["paths"]["/pets"], json!({}));
            }
        }
    }

    #[test]
    fn attach_editor_wires_open_and_save_res() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut bridge = UiBridge::new(tx);
        let state = Rc::new(RefCell::new(EditorSessionState::new()));
        attach_editor(&mut bridge, Rc::clone(&state));

        bridge.dispatch(HostMessage::Open {
            data: openapi_text(),
            ext_refs: Vec::new(),
            workspace_path: "/workspace".to_string(),
        });
        assert_eq!(state.borrow().view(), EditorView::Editor);

        let save = state.borrow_mut().request_save().expect("save request");
        assert!(matches!(save, UiMessage::SaveReq { .. }));
        bridge.dispatch(HostMessage::SaveRes);
        assert!(!state.borrow().save_in_flight());
    }
}
