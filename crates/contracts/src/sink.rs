//! Sink trait - side-channel consumer of datasets
//!
//! Defines the abstract interface for sinks.

use std::any::Any;
use std::fmt;

use crate::{ContractError, Dataset, DumpError, OptionDescriptor, OptionList};

/// Data sink
///
/// All sink variants must implement this trait. A sink owns its option state
/// and is rebuilt, never patched, when its configuration changes.
pub trait Sink: Send + fmt::Debug {
    /// Registered type name (first token of the configuration string)
    fn type_name(&self) -> &str;

    /// Human readable description of what the sink does
    fn global_info(&self) -> &str;

    /// Options this sink understands
    fn list_options(&self) -> Vec<OptionDescriptor> {
        Vec::new()
    }

    /// Read this sink's options from `options`
    ///
    /// Implementations take what they understand and finish with
    /// `options.ensure_consumed()`, so the option set stays closed.
    ///
    /// # Errors
    /// `UnsupportedOption` for left-over tokens, `MissingOptionValue` for
    /// truncated options.
    fn set_options(&mut self, options: &mut OptionList) -> Result<(), ContractError> {
        options.ensure_consumed()
    }

    /// Current option tokens, parseable by `set_options`
    fn options(&self) -> Vec<String> {
        Vec::new()
    }

    /// Consume a dataset
    ///
    /// # Errors
    /// Returns dump error (should include the underlying cause)
    fn dump(&mut self, data: &Dataset) -> Result<(), DumpError>;

    /// Runtime access to the concrete variant
    fn as_any(&self) -> &dyn Any;
}
