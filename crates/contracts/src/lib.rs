//! # Contracts
//!
//! Frozen interface contracts, defining inter-crate data structures and traits.
//! All other crates depend on this crate, reverse dependencies are prohibited.
//!
//! ## Data Model
//! - `Dataset` is opaque to sinks and decorators, passed by (cheaply cloned) reference
//! - A `Sink` owns its options and is replaced wholesale on reconfiguration

mod dataset;
mod error;
mod host;
mod options;
mod settings;
mod sink;

pub use dataset::{Attribute, AttributeKind, Dataset, Record, Value};
pub use error::*;
pub use host::*;
pub use options::{OptionDescriptor, OptionList};
pub use settings::*;
pub use sink::Sink;
