// src/services/cleanup.rs
// DOCUMENTATION: Best-effort image file removal
// PURPOSE: Delete files outside the request path and outside any transaction

use std::path::PathBuf;
use tokio::sync::mpsc;

/// Handle to the background file cleanup worker
/// DOCUMENTATION: Cloning is cheap; every clone feeds the same worker.
/// Enqueueing never blocks and never fails the caller.
#[derive(Clone)]
pub struct FileCleanup {
    tx: mpsc::UnboundedSender<PathBuf>,
}

impl FileCleanup {
    /// Start the background worker on the current runtime
    pub fn spawn() -> Self {
        let (cleanup, mut rx) = Self::channel();

        tokio::spawn(async move {
            while let Some(path) = rx.recv().await {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => log::info!("Removed image file {}", path.display()),
                    Err(e) => log::warn!("Could not remove image file {}: {}", path.display(), e),
                }
            }
            log::debug!("File cleanup worker stopped");
        });

        cleanup
    }

    /// Queue without a worker; the receiver sees every enqueued path
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PathBuf>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn enqueue(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Err(e) = self.tx.send(path) {
            log::warn!("File cleanup worker is gone, leaving {}", e.0.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_worker_removes_file() {
        let path = std::env::temp_dir().join(format!("cleanup-{}.png", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"png").await.unwrap();

        let cleanup = FileCleanup::spawn();
        cleanup.enqueue(path.clone());

        for _ in 0..50 {
            if !path.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!path.exists());
    }

    #[actix_rt::test]
    async fn test_missing_file_does_not_stop_worker() {
        let cleanup = FileCleanup::spawn();
        cleanup.enqueue("/definitely/not/here.png");

        let path = std::env::temp_dir().join(format!("cleanup-{}.png", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, b"png").await.unwrap();
        cleanup.enqueue(path.clone());

        for _ in 0..50 {
            if !path.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_enqueue_after_worker_gone_is_silent() {
        let (cleanup, rx) = FileCleanup::channel();
        drop(rx);
        cleanup.enqueue("uploads/images/gone.png");
    }
}
