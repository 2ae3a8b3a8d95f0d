//! Session container
//!
//! Maps open file paths to live host sessions and enforces at-most-one
//! session per path. An explicitly constructed service with its own
//! lifecycle: embedders create one per workspace and pass it by
//! reference; nothing here is process-global.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::notify::Notifier;
use crate::panel::{PanelFactory, ViewSlot};
use crate::session::{HostSession, HostSessionHandle, SessionCommand};

pub struct SessionRegistry {
    workspace_root: PathBuf,
    panels: Box<dyn PanelFactory>,
    notifier: Arc<dyn Notifier>,
    sessions: HashMap<PathBuf, HostSessionHandle>,
    next_slot: ViewSlot,
}

impl SessionRegistry {
    pub fn new(
        workspace_root: impl Into<PathBuf>,
        panels: Box<dyn PanelFactory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            panels,
            notifier,
            sessions: HashMap::new(),
            next_slot: ViewSlot::first(),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn contains(&self, file_path: &Path) -> bool {
        self.sessions.contains_key(file_path)
    }

    /// Return the session for `file_path`, creating it with the next
    /// placement slot if none exists. Either way the panel is brought to
    /// the foreground.
    pub async fn open_or_reveal(&mut self, file_path: &Path) -> &HostSessionHandle {
        let handle = match self.sessions.entry(file_path.to_path_buf()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let slot = self.next_slot;
                self.next_slot = slot.next();

                let title = format!("Apidesk - {}", display_name(file_path));
                let panel = self.panels.create(&title, slot);
                let session = HostSession::new(
                    file_path,
                    &self.workspace_root,
                    panel,
                    self.notifier.clone(),
                );

                info!(
                    component = "registry",
                    event = "registry.session.created",
                    file = %file_path.display(),
                    slot = slot.0,
                    "Created host session"
                );
                entry.insert(HostSessionHandle::spawn(session, slot))
            }
        };

        handle.send(SessionCommand::Reveal).await;
        handle
    }

    /// Remove the session for `file_path` and release its resources.
    /// Disposing an untracked path is a no-op.
    pub async fn dispose(&mut self, file_path: &Path) {
        match self.sessions.remove(file_path) {
            Some(handle) => {
                handle.send(SessionCommand::Dispose).await;
                info!(
                    component = "registry",
                    event = "registry.session.disposed",
                    file = %file_path.display(),
                    "Disposed host session"
                );
            }
            None => {
                debug!(
                    component = "registry",
                    event = "registry.dispose.untracked",
                    file = %file_path.display(),
                    "Dispose for untracked path, no-op"
                );
            }
        }
    }

    /// Dispose every tracked session.
    pub async fn shutdown(&mut self) {
        for (_, handle) in self.sessions.drain() {
            handle.send(SessionCommand::Dispose).await;
        }
    }
}

fn display_name(file_path: &Path) -> String {
    file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.display().to_string())
}
