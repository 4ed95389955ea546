//! Layered error definitions
//!
//! Categorized by source: config / sink / host

use thiserror::Error;

/// Boxed error used at collaborator boundaries
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a sink's `dump`
#[derive(Debug, Error)]
#[error("sink '{sink_name}' dump failed: {source}")]
pub struct DumpError {
    pub sink_name: String,
    #[source]
    pub source: BoxError,
}

impl DumpError {
    pub fn new(sink_name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            sink_name: sink_name.into(),
            source: source.into(),
        }
    }
}

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration String Errors =====
    /// Unbalanced quoting or stray characters in a configuration string
    #[error("malformed configuration: {message}")]
    MalformedConfig { message: String },

    /// Type name not present in the sink registry
    #[error("unknown sink type: '{name}'")]
    UnknownSinkType { name: String },

    /// Tokens left over after a component parsed its own options
    #[error("unsupported options: {options:?}")]
    UnsupportedOption { options: Vec<String> },

    /// Option that requires a value was the last token
    #[error("no value given for option '-{option}'")]
    MissingOptionValue { option: String },

    // ===== Settings File Errors =====
    /// Settings file parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Settings validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Runtime Errors =====
    /// Sink dump failure, aborts the enclosing host operation
    #[error(transparent)]
    Dump(#[from] DumpError),

    /// Wrapped component lacks an optional capability
    #[error("{component} does not support capability '{capability}'")]
    UnsupportedCapability {
        component: String,
        capability: String,
    },

    /// Failure reported by a wrapped host component
    #[error("{component}: {message}")]
    Host { component: String, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create malformed configuration error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedConfig {
            message: message.into(),
        }
    }

    /// Create unknown sink type error
    pub fn unknown_sink_type(name: impl Into<String>) -> Self {
        Self::UnknownSinkType { name: name.into() }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create unsupported capability error
    pub fn unsupported_capability(
        component: impl Into<String>,
        capability: impl Into<String>,
    ) -> Self {
        Self::UnsupportedCapability {
            component: component.into(),
            capability: capability.into(),
        }
    }

    /// Create host component error
    pub fn host(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Host {
            component: component.into(),
            message: message.into(),
        }
    }

    /// The dump failure behind this error, if any
    pub fn as_dump(&self) -> Option<&DumpError> {
        match self {
            Self::Dump(e) => Some(e),
            _ => None,
        }
    }
}
