//! Sink implementations
//!
//! Contains NullSink, MemorySink, and DiskSink.

mod disk;
mod memory;
mod null;

pub use self::disk::{format_timestamp, timestamped_path, DiskSink, TIMESTAMP_FORMAT};
pub use self::memory::{DataChanged, DataListener, MemorySink};
pub use self::null::NullSink;
