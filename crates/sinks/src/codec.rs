//! Configuration codec
//!
//! Turns token streams into configured sinks and configured sinks back into
//! configuration strings (`<type-name> <option-tokens...>`).

use std::fmt;

use config_loader::{join_options, split_options};
use contracts::{ContractError, OptionList, Sink, StageConfig};
use tracing::debug;

use crate::registry::{SinkRegistry, DEFAULT_SINK_TYPE};

/// Parsed sink configuration: type name plus the sink's own option tokens
///
/// Every constructor goes through a live sink, so specs are always in the
/// sink's canonical form and two specs describing the same configuration
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SinkSpec {
    type_name: String,
    options: Vec<String>,
}

impl SinkSpec {
    fn new(type_name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            type_name: type_name.into(),
            options,
        }
    }

    /// Canonical spec for a type name and option tokens in any order
    ///
    /// # Errors
    /// Same as `parse`.
    pub fn canonical(
        type_name: &str,
        options: &[String],
        registry: &SinkRegistry,
    ) -> Result<Self, ContractError> {
        let mut tokens = Vec::with_capacity(options.len() + 1);
        tokens.push(type_name.to_string());
        tokens.extend(options.iter().cloned());
        parse(&tokens, registry)
    }

    /// Spec describing a live sink
    pub fn of(sink: &dyn Sink) -> Self {
        Self::new(sink.type_name(), sink.options())
    }

    /// The default `Null` spec
    pub fn null() -> Self {
        Self::new(DEFAULT_SINK_TYPE, Vec::new())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Build a configured sink from this spec
    ///
    /// # Errors
    /// `UnknownSinkType`, `UnsupportedOption` or `MissingOptionValue`.
    pub fn build(&self, registry: &SinkRegistry) -> Result<Box<dyn Sink>, ContractError> {
        let mut tokens = Vec::with_capacity(self.options.len() + 1);
        tokens.push(self.type_name.clone());
        tokens.extend(self.options.iter().cloned());
        parse_sink(&tokens, registry)
    }
}

impl Default for SinkSpec {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for SinkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

/// Parse tokens into a canonical spec
///
/// The spec is validated by building the sink, so configuration errors show
/// up here rather than at first use.
pub fn parse(tokens: &[String], registry: &SinkRegistry) -> Result<SinkSpec, ContractError> {
    let sink = parse_sink(tokens, registry)?;
    Ok(SinkSpec::of(sink.as_ref()))
}

/// Parse tokens into a configured sink
///
/// The first token names the type; the rest go to the sink's own option
/// parser with the type-name slot blanked. No tokens yields the default sink.
///
/// # Errors
/// `UnknownSinkType` for an unregistered name, `UnsupportedOption` for tokens
/// the sink did not consume, `MissingOptionValue` for truncated options.
pub fn parse_sink(
    tokens: &[String],
    registry: &SinkRegistry,
) -> Result<Box<dyn Sink>, ContractError> {
    let Some(type_name) = tokens.first() else {
        return Ok(registry.default_sink());
    };

    let factory = registry.resolve(type_name)?;
    let mut sink = factory.new_instance();

    let mut options = tokens.to_vec();
    options[0].clear();
    sink.set_options(&mut OptionList::new(options))?;

    debug!(sink_type = %type_name, options = ?sink.options(), "Sink configured");
    Ok(sink)
}

/// Tokenize and parse a configuration string
pub fn parse_str(raw: &str, registry: &SinkRegistry) -> Result<SinkSpec, ContractError> {
    parse(&split_options(raw)?, registry)
}

/// Tokenize a configuration string and build the sink
pub fn parse_sink_str(
    raw: &str,
    registry: &SinkRegistry,
) -> Result<Box<dyn Sink>, ContractError> {
    parse_sink(&split_options(raw)?, registry)
}

/// Render a spec as a configuration string
pub fn serialize(spec: &SinkSpec) -> String {
    let mut tokens = Vec::with_capacity(spec.options.len() + 1);
    tokens.push(spec.type_name.as_str());
    tokens.extend(spec.options.iter().map(String::as_str));
    join_options(&tokens)
}

/// Configuration string of a live sink
pub fn to_config_string(sink: &dyn Sink) -> String {
    serialize(&SinkSpec::of(sink))
}

/// Build the sink a settings stage asks for, `Null` when it names none
pub fn build_stage_sink(
    stage: &StageConfig,
    registry: &SinkRegistry,
) -> Result<Box<dyn Sink>, ContractError> {
    match stage.dumper.as_deref() {
        Some(raw) => parse_sink_str(raw, registry),
        None => Ok(registry.default_sink()),
    }
}
