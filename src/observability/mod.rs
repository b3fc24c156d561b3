//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → userdeck-otlp.json
//! ```
//!
//! Traces land in `~/.local/share/zellij/userdeck/userdeck-otlp.json` (seen
//! from the sandbox under `/host`). The file rotates at 10 MB and keeps three
//! backups. The plugin and its export worker both install the subscriber, and
//! worker spans are parented to the plugin span that posted the message.
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider and span exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: rotating trace file

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
