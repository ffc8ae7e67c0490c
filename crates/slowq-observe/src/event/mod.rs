//! JSON event rendering in the shape log-based monitoring backends ingest.
//!
//! Every event becomes one line:
//!
//! ```text
//! {"timestamp":"2024-05-01T10:00:00.123Z","level":"info","logger":"slowq_inspect::detect","message":"slow task detected","task":"{...}"}
//! ```
//!
//! An event carrying an error value (`error = &err as &dyn std::error::Error`) gains
//! `error.kind`, `error.message` and `error.stack`, and its `message` is replaced by
//! the stack so the backend's error view shows the full cause chain.
mod error_fields;
mod layer;
mod record;
mod sink;
mod visitor;

pub use error_fields::ErrorFields;
pub use layer::JsonEventLayer;
pub use record::EventRecord;
pub use sink::BufferSink;
