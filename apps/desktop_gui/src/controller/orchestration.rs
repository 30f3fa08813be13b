//! Command orchestration from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues a command for the worker. A full or disconnected queue comes back
/// as a user-facing message instead of a panic.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = match &cmd {
        BackendCommand::LoadMovie => "load_movie",
        BackendCommand::FetchPoster { .. } => "fetch_poster",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            Err("Trop d'opérations en attente, merci de réessayer.".to_string())
        }
        Err(TrySendError::Disconnected(_)) => {
            Err("Le service réseau ne répond plus, merci de relancer l'application.".to_string())
        }
    }
}
