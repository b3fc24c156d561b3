//! Worker thread implementation for export file writes.
//!
//! Filesystem access runs here, on a thread spawned by Zellij, so a slow disk
//! never stalls rendering. The worker receives a shaped export, hands it to a
//! [`FileSink`] and reports the written path back to the plugin.

use crate::domain::error::Result;
use crate::export::{ExportFile, ExportSink, FileSink};
use crate::infrastructure::paths;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// The sink is created lazily for the first export and replaced only when an
/// export targets a different directory.
#[derive(Serialize, Deserialize, Default)]
pub struct ExportWorker {
    #[serde(skip)]
    sink: Option<FileSink>,
}

impl ExportWorker {
    /// Returns a sink writing into `dir`, reusing the current one when it matches.
    fn sink_for(&mut self, dir: &Path) -> &FileSink {
        if !matches!(&self.sink, Some(sink) if sink.dir() == dir) {
            tracing::debug!(export_dir = ?dir, "creating export sink");
            self.sink = Some(FileSink::new(dir));
        }
        self.sink.as_ref().expect("sink initialized above")
    }

    /// Converts an operation result into a response with consistent logging.
    fn handle_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "worker operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Handles the `WriteExport` message.
    fn handle_write_export(&mut self, file: &ExportFile, export_dir: &str) -> WorkerResponse {
        let dir = PathBuf::from(paths::expand_tilde(export_dir));
        let bytes = file.contents.len();

        Self::handle_result("write export", self.sink_for(&dir).offer(file), |path| {
            let path = paths::strip_host_prefix(&path.to_string_lossy());
            tracing::info!(path = %path, bytes, "export file written");
            WorkerResponse::ExportWritten { path, bytes }
        })
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response for the plugin.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message").entered();

        match message {
            WorkerMessage::WriteExport {
                file_name,
                contents,
                export_dir,
                ..
            } => self.handle_write_export(&ExportFile { file_name, contents }, &export_dir),
        }
    }
}

/// Initializes tracing for the worker thread with the default configuration.
fn init_worker_tracing() {
    crate::observability::init_tracing(&crate::Config::default());
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for ExportWorker {
    /// Decodes the JSON payload, handles it and posts the response back under
    /// the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(worker: &mut ExportWorker, dir: &Path, name: &str) -> WorkerResponse {
        worker.handle_message(WorkerMessage::WriteExport {
            file_name: name.to_string(),
            contents: "ID,Name".to_string(),
            export_dir: dir.to_string_lossy().into_owned(),
            trace_context: None,
        })
    }

    #[test]
    fn writes_export_and_reports_path() {
        let dir = TempDir::new().unwrap();
        let mut worker = ExportWorker::default();

        let response = write(&mut worker, dir.path(), "users_2024-01-01.csv");

        let expected = dir.path().join("users_2024-01-01.csv");
        assert_eq!(
            response,
            WorkerResponse::ExportWritten {
                path: expected.to_string_lossy().into_owned(),
                bytes: 7,
            }
        );
        assert_eq!(std::fs::read_to_string(expected).unwrap(), "ID,Name");
    }

    #[test]
    fn sink_follows_the_requested_directory() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let mut worker = ExportWorker::default();

        write(&mut worker, first.path(), "a.csv");
        write(&mut worker, second.path(), "b.csv");

        assert!(first.path().join("a.csv").exists());
        assert!(second.path().join("b.csv").exists());
        assert!(!first.path().join("b.csv").exists());
    }

    #[test]
    fn sink_is_reused_for_the_same_directory() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let mut worker = ExportWorker::default();
        assert!(worker.sink.is_none());

        let reused: *const FileSink = worker.sink_for(first.path());
        assert!(std::ptr::eq(reused, worker.sink_for(first.path())));
        assert_eq!(worker.sink_for(second.path()).dir(), second.path());
        assert_eq!(worker.sink.as_ref().map(FileSink::dir), Some(second.path()));
    }

    #[test]
    fn failures_become_error_responses() {
        let dir = TempDir::new().unwrap();
        let mut worker = ExportWorker::default();
        let response = write(&mut worker, dir.path(), "../escape.csv");
        assert!(matches!(response, WorkerResponse::Error { message } if message.starts_with("write export:")));
    }
}
