//! Tracer provider backed by a local OTLP JSON file.
//!
//! The plugin sandbox has no network path to a collector, so finished spans
//! are appended to a file under the plugin data directory instead.

use super::file_writer::RotatingFile;
use super::span_formatter::SpanFormatter;
use futures_util::future::{self, BoxFuture};
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Span exporter writing one OTLP document per batch.
#[derive(Debug)]
struct OtlpFileExporter {
    file: RotatingFile,
    formatter: SpanFormatter,
    stopped: bool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let document = self.formatter.format_batch(&batch).to_string();
            self.file
                .append_line(&document)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Creates a provider exporting every finished span to `file_path`.
///
/// Spans are exported synchronously as they end; the plugin runtime has no
/// background executor to drive a batch processor.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        file: RotatingFile::new(file_path),
        formatter: SpanFormatter::new(resource.clone()),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
