//! # Tee
//!
//! Decorators that tee a host component's input data to a sink before
//! handing it to the component.
//!
//! | decorator | host trait | teed operation |
//! |-----------|------------|----------------|
//! | `TrainableTee` | `Trainable` | `train` |
//! | `ClusterableTee` | `Clusterable` | `build` |
//! | `BatchTee` | `BatchTransformable` | `process` |
//!
//! A failing dump aborts the host operation before the wrapped component runs.
//! Configuration strings put the sink first (`-dumper <sink spec>`) and hand
//! everything else to the wrapped component.
//!
//! ```
//! use contracts::BatchTransformable;
//! use sinks::MemorySink;
//! use tee::BatchTee;
//!
//! let memory = MemorySink::new();
//! let mut filter = BatchTee::pass_through().with_sink(Box::new(memory.clone()));
//!
//! let data = contracts::Dataset::empty("batch");
//! filter.process(&data).unwrap();
//! assert!(memory.data().unwrap().same_snapshot(&data));
//! ```

#[macro_use]
mod macros;

pub mod batch;
pub mod clusterable;
pub mod metrics;
pub mod shared;
pub mod trainable;

pub use batch::{BatchTee, PassThrough};
pub use clusterable::ClusterableTee;
pub use metrics::{MetricsSnapshot, TeeMetrics};
pub use shared::{Tee, DUMPER_OPTION};
pub use trainable::TrainableTee;
