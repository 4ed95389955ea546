//! Sinks - pluggable destinations for intermediate datasets
//!
//! A sink receives a dataset snapshot each time a host stage finishes an
//! operation. Variants are looked up by type name through a `SinkRegistry`
//! and configured from option tokens:
//!
//! - `Null`: discards everything (the default)
//! - `Memory`: keeps the latest dataset and notifies listeners
//! - `Disk`: writes each dataset to a file, optionally timestamped
//!
//! ```
//! use sinks::{codec, SinkRegistry};
//!
//! let registry = SinkRegistry::with_defaults();
//! let spec = codec::parse_str("Disk -output-file \"my data.arff\"", &registry).unwrap();
//! assert_eq!(spec.type_name(), "Disk");
//! assert_eq!(spec.to_string(), "Disk -output-file \"my data.arff\"");
//! ```

pub mod codec;
pub mod format;
pub mod registry;
pub mod variants;

pub use codec::{
    build_stage_sink, parse, parse_sink, parse_str, serialize, to_config_string, SinkSpec,
};
pub use contracts::Sink;
pub use format::{DatasetWriter, FormatWriter, OutputFormat};
pub use registry::{FnSinkFactory, SinkDescription, SinkFactory, SinkRegistry, DEFAULT_SINK_TYPE};
pub use variants::{DataChanged, DataListener, DiskSink, MemorySink, NullSink};
