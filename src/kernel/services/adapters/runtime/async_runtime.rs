use super::message::AppMessage;
use crate::kernel::editor::{check, CheckOutcome, CheckRequest, CheckResult, DocumentId};
use crate::kernel::services::ports::{CheckConfig, CheckExecutor};
use ropey::Rope;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

/// Slack on top of the parser's own timeout before the task is abandoned.
const TASK_GRACE: Duration = Duration::from_millis(500);

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    analyzer_timeout: Duration,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>, config: &CheckConfig) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads.max(1))
            .thread_name("pyedit-worker")
            .enable_all()
            .build()
            .inspect_err(|e| {
                tracing::error!(error = %e, "failed to create tokio runtime");
            })?;
        Ok(Self {
            runtime,
            tx,
            analyzer_timeout: config.analyzer_timeout(),
        })
    }

    pub fn load_file(&self, path: PathBuf) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    // Binary files still open; invalid sequences become U+FFFD.
                    let content = String::from_utf8_lossy(&bytes).into_owned();
                    let _ = tx.send(AppMessage::FileLoaded { path, content });
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::FileError {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    pub fn write_file(&self, doc: DocumentId, path: PathBuf, version: u64, rope: Rope) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let path_for_write = path.clone();
            let result =
                tokio::task::spawn_blocking(move || write_rope_to_path(&path_for_write, &rope))
                    .await;

            let message = match result {
                Ok(Ok(())) => AppMessage::FileSaved { doc, path, version },
                Ok(Err(e)) => AppMessage::FileError {
                    path,
                    error: e.to_string(),
                },
                Err(e) => AppMessage::FileError {
                    path,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    fn run_check(&self, request: CheckRequest) {
        let tx = self.tx.clone();
        let timeout = self.analyzer_timeout;
        self.runtime.spawn(async move {
            let started = Instant::now();
            let CheckRequest {
                doc,
                seq,
                version,
                text,
            } = request;

            let job = tokio::task::spawn_blocking(move || check(&text, timeout));
            let outcome = match tokio::time::timeout(timeout + TASK_GRACE, job).await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    tracing::warn!(?doc, seq, error = %e, "syntax check task failed");
                    CheckOutcome::Crashed
                }
                Err(_) => CheckOutcome::TimedOut,
            };
            if matches!(outcome, CheckOutcome::TimedOut) {
                tracing::warn!(
                    ?doc,
                    seq,
                    timeout_ms = timeout.as_millis() as u64,
                    "syntax check timed out"
                );
            }

            let _ = tx.send(AppMessage::CheckCompleted(CheckResult {
                doc,
                seq,
                version,
                outcome,
                elapsed: started.elapsed(),
            }));
        });
    }
}

impl CheckExecutor for AsyncRuntime {
    fn submit(&self, request: CheckRequest) {
        self.run_check(request);
    }
}

fn write_rope_to_path(path: &std::path::Path, rope: &Rope) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    for chunk in rope.chunks() {
        writer.write_all(chunk.as_bytes())?;
    }
    writer.flush()
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
