mod logger;
pub use logger::*;

mod event;
pub use event::{BufferSink, ErrorFields, EventRecord, JsonEventLayer};
