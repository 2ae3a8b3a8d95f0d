//! Host session: the authoritative process-side half of one file's edit.
//!
//! Each session runs as an independent tokio task owning its panel
//! resource. Callers communicate via [`HostSessionHandle`], which sends
//! [`SessionCommand`]s over an mpsc channel; the loop processes one
//! command at a time, so two envelopes for the same file are never
//! handled concurrently and a save can never overlap the open that
//! preceded it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use apidesk_protocol::{codec, HostMessage, UiMessage};

use crate::config::load_adt_config;
use crate::models::fetch_models_from_folder;
use crate::notify::Notifier;
use crate::panel::{Panel, ViewSlot};
use crate::refscan::scan_external_refs;

/// Lifecycle phase of a session. `Rendering` covers the window between
/// panel allocation and the webview's `ready` envelope; `Disposed` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Rendering,
    Ready,
    Disposed,
}

/// Commands accepted by a session's actor loop.
#[derive(Debug)]
pub enum SessionCommand {
    /// An inbound envelope from the webview.
    Ui(UiMessage),
    /// Bring the panel to the foreground.
    Reveal,
    /// Release the panel and end the session.
    Dispose,
}

/// Result of a save request. `Partial` means the write was attempted and
/// failed; the file on disk may be in an inconsistent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    NotAttempted,
    Partial,
    Complete,
}

pub struct HostSession {
    file_path: PathBuf,
    workspace_root: PathBuf,
    panel: Box<dyn Panel>,
    notifier: Arc<dyn Notifier>,
    phase: SessionPhase,
}

impl HostSession {
    pub fn new(
        file_path: impl Into<PathBuf>,
        workspace_root: impl Into<PathBuf>,
        panel: Box<dyn Panel>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            workspace_root: workspace_root.into(),
            panel,
            notifier,
            phase: SessionPhase::Rendering,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Process one command to completion. The actor loop guarantees no
    /// two commands for the same session run concurrently.
    pub async fn handle(&mut self, command: SessionCommand) {
        if self.phase == SessionPhase::Disposed {
            debug!(
                component = "host_session",
                event = "session.command.after_dispose",
                file = %self.file_path.display(),
                "Command received after dispose, ignoring"
            );
            return;
        }

        match command {
            SessionCommand::Ui(UiMessage::Ready) => self.on_ready().await,
            SessionCommand::Ui(UiMessage::SaveReq { data }) => {
                self.save(&data).await;
            }
            SessionCommand::Ui(UiMessage::Alert { data }) => self.notifier.error(&data),
            SessionCommand::Ui(UiMessage::ReadLocal { data }) => self.on_read_local(&data).await,
            SessionCommand::Reveal => self.panel.reveal(),
            SessionCommand::Dispose => {
                self.panel.dispose();
                self.phase = SessionPhase::Disposed;
            }
        }
    }

    /// The `ready` pipeline, run strictly in sequence: read the file,
    /// scan its references, await the optional workspace configuration,
    /// pre-fetch model folders, then emit the `open` envelope.
    async fn on_ready(&mut self) {
        let text = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    component = "host_session",
                    event = "session.open.read_failed",
                    file = %self.file_path.display(),
                    error = %e,
                    "Failed to read session file"
                );
                self.notifier.error(&format!("Error: {e}"));
                return;
            }
        };

        let ext_refs = match codec::parse_text(&text) {
            Some((doc, _)) => scan_external_refs(&self.workspace_root, &doc),
            None => {
                // The webview does its own parse and shows a recoverable
                // error state; the host just skips the reference scan.
                warn!(
                    component = "host_session",
                    event = "session.open.unparseable",
                    file = %self.file_path.display(),
                    "File is neither JSON nor YAML, skipping reference scan"
                );
                Vec::new()
            }
        };

        match load_adt_config(&self.workspace_root).await {
            Some(config) => {
                let models: Vec<_> = config
                    .model_folders
                    .iter()
                    .flat_map(|folder| fetch_models_from_folder(&self.workspace_root, folder))
                    .collect();
                // Informational only for now; the open envelope carries
                // refs, not model listings.
                info!(
                    component = "host_session",
                    event = "session.models.fetched",
                    file = %self.file_path.display(),
                    folders = config.model_folders.len(),
                    models = models.len(),
                    "Fetched configured model folders"
                );
                self.notifier.info("Successfully read all model folders");
            }
            None => self.notifier.warn("Unable to read adt configuration"),
        }

        debug!(
            component = "host_session",
            event = "session.open.emit",
            file = %self.file_path.display(),
            ext_refs = ext_refs.len(),
            "Emitting open envelope"
        );
        self.panel.post(HostMessage::Open {
            data: text,
            ext_refs,
            workspace_path: self.workspace_root.display().to_string(),
        });
        self.phase = SessionPhase::Ready;
    }

    /// Write `data` verbatim to the session's file. Best-effort: a failed
    /// write may leave the file inconsistent, which the outcome makes
    /// explicit.
    pub async fn save(&mut self, data: &str) -> SaveOutcome {
        if self.phase == SessionPhase::Disposed {
            return SaveOutcome::NotAttempted;
        }

        match tokio::fs::write(&self.file_path, data).await {
            Ok(()) => {
                info!(
                    component = "host_session",
                    event = "session.save.complete",
                    file = %self.file_path.display(),
                    bytes = data.len(),
                    "Saved session file"
                );
                self.notifier
                    .info(&format!("{} saved successfully", self.file_path.display()));
                self.panel.post(HostMessage::SaveRes);
                SaveOutcome::Complete
            }
            Err(e) => {
                warn!(
                    component = "host_session",
                    event = "session.save.failed",
                    file = %self.file_path.display(),
                    error = %e,
                    "Failed to write session file"
                );
                self.notifier
                    .error(&format!("Failed to save {}: {e}", self.file_path.display()));
                SaveOutcome::Partial
            }
        }
    }

    /// Read a workspace-relative file on the webview's behalf. The result
    /// is currently discarded; the documented contract defines no
    /// response envelope for this message.
    async fn on_read_local(&self, relative: &str) {
        let path = self.workspace_root.join(relative);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(
                    component = "host_session",
                    event = "session.read_local",
                    path = %path.display(),
                    bytes = content.len(),
                    "Read local file, result discarded"
                );
            }
            Err(e) => {
                warn!(
                    component = "host_session",
                    event = "session.read_local.failed",
                    path = %path.display(),
                    error = %e,
                    "Failed to read local file"
                );
            }
        }
    }
}

/// Handle to a running session actor (cheap to clone).
#[derive(Clone)]
pub struct HostSessionHandle {
    file_path: PathBuf,
    slot: ViewSlot,
    command_tx: mpsc::Sender<SessionCommand>,
}

impl HostSessionHandle {
    /// Spawn the session's actor loop, returning the handle used to feed
    /// it commands.
    pub fn spawn(session: HostSession, slot: ViewSlot) -> Self {
        let (command_tx, command_rx) = mpsc::channel(256);
        let file_path = session.file_path.clone();

        tokio::spawn(session_loop(session, command_rx));

        Self {
            file_path,
            slot,
            command_tx,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn slot(&self) -> ViewSlot {
        self.slot
    }

    /// Send a command to the actor (fire-and-forget).
    pub async fn send(&self, command: SessionCommand) {
        if self.command_tx.send(command).await.is_err() {
            warn!(
                component = "host_session",
                event = "session.channel_closed",
                file = %self.file_path.display(),
                "Session loop ended, command dropped"
            );
        }
    }
}

async fn session_loop(mut session: HostSession, mut command_rx: mpsc::Receiver<SessionCommand>) {
    while let Some(command) = command_rx.recv().await {
        session.handle(command).await;
        if session.phase() == SessionPhase::Disposed {
            break;
        }
    }
}
