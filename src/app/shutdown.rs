//! Background task shutdown.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Stops the progress logger and waits for it to exit.
pub async fn shutdown_gracefully(cancel: CancellationToken, logging_task: Option<JoinHandle<()>>) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}
