//! Background worker thread for export file writes.
//!
//! The worker keeps filesystem I/O off the main plugin UI thread. It uses
//! Zellij's worker API for cross-thread communication and propagates trace
//! context across the boundary.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::ExportWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
