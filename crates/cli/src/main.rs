//! Apidesk CLI
//!
//! The standalone embedding: a host session registry and an in-process
//! webview wired together over channels, driven from the terminal. Useful
//! for exercising the open flow against real files without an editor
//! around it.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apidesk_host::{ChannelPanelFactory, SessionCommand, SessionRegistry, TracingNotifier};
use apidesk_webview::{attach_editor, EditorSessionState, EditorView, UiBridge};

/// How long to wait for the host to answer the open flow before giving up.
const OPEN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "apidesk", about = "Visual API-definition editor host", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a spec file and run the full host/webview open flow.
    Open {
        file: PathBuf,

        /// Workspace root for reference resolution; defaults to the
        /// file's directory.
        #[arg(long)]
        workspace: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Open { file, workspace } => open_file(file, workspace).await,
    }
}

async fn open_file(file: PathBuf, workspace: Option<PathBuf>) -> anyhow::Result<()> {
    let workspace = match workspace {
        Some(dir) => dir,
        None => file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    info!(
        component = "cli",
        event = "cli.open",
        file = %file.display(),
        workspace = %workspace.display(),
        "Opening edit session"
    );

    let (host_tx, mut host_rx) = mpsc::unbounded_channel();
    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();

    let mut registry = SessionRegistry::new(
        &workspace,
        Box::new(ChannelPanelFactory::new(host_tx)),
        Arc::new(TracingNotifier),
    );
    let session = registry.open_or_reveal(&file).await.clone();

    let mut bridge = UiBridge::new(ui_tx);
    let state = Rc::new(RefCell::new(EditorSessionState::new()));
    attach_editor(&mut bridge, Rc::clone(&state));
    bridge.ready();

    // Pump envelopes both ways until the editor leaves its loading state.
    let opened = tokio::time::timeout(OPEN_TIMEOUT, async {
        loop {
            tokio::select! {
                Some(ui_msg) = ui_rx.recv() => {
                    session.send(SessionCommand::Ui(ui_msg)).await;
                }
                Some(host_msg) = host_rx.recv() => {
                    bridge.dispatch(host_msg);
                    if state.borrow().view() != EditorView::Loading {
                        break;
                    }
                }
                else => break,
            }
        }
    })
    .await;

    registry.shutdown().await;

    if opened.is_err() {
        bail!("host did not answer the open request for {}", file.display());
    }

    let state = state.borrow();
    if state.view() != EditorView::Editor {
        bail!("{} could not be parsed as JSON or YAML", file.display());
    }

    println!("Opened {}", file.display());
    println!("  workspace: {}", bridge.workspace_path().unwrap_or("-"));
    println!("  encoding:  {:?}", state.encoding());
    println!("  profile:   {:?}", state.profile());
    println!("  external references: {}", state.ext_refs().len());
    for reference in state.ext_refs() {
        println!("    {} ({} bytes)", reference.path, reference.content.len());
    }

    Ok(())
}
