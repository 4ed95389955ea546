//! Sink registry - maps type names to constructors
//!
//! New variants are added by registering a factory; existing registrations
//! cannot be replaced.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use contracts::{ContractError, OptionDescriptor, Sink};

use crate::variants::{DiskSink, MemorySink, NullSink};

/// Type name used when no sink is configured
pub const DEFAULT_SINK_TYPE: &str = NullSink::TYPE_NAME;

/// Builds unconfigured sink instances of one type
pub trait SinkFactory: Send + Sync {
    fn type_name(&self) -> &str;

    /// Fresh instance with default options
    fn new_instance(&self) -> Box<dyn Sink>;

    /// Type used when no configuration is supplied
    fn default_type_name(&self) -> &str {
        DEFAULT_SINK_TYPE
    }

    /// Whether interactive configuration surfaces should offer this type
    fn interactive(&self) -> bool {
        true
    }
}

/// Factory backed by a plain constructor function
#[derive(Clone, Copy)]
pub struct FnSinkFactory {
    type_name: &'static str,
    interactive: bool,
    ctor: fn() -> Box<dyn Sink>,
}

impl FnSinkFactory {
    pub const fn new(type_name: &'static str, ctor: fn() -> Box<dyn Sink>) -> Self {
        Self {
            type_name,
            interactive: true,
            ctor,
        }
    }

    /// Hide the type from interactive configuration
    pub const fn programmatic_only(mut self) -> Self {
        self.interactive = false;
        self
    }
}

impl SinkFactory for FnSinkFactory {
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn new_instance(&self) -> Box<dyn Sink> {
        (self.ctor)()
    }

    fn interactive(&self) -> bool {
        self.interactive
    }
}

/// Display information about a registered type
#[derive(Debug, Clone)]
pub struct SinkDescription {
    pub type_name: String,
    pub global_info: String,
    pub options: Vec<OptionDescriptor>,
    pub interactive: bool,
}

/// Registry of known sink types
#[derive(Clone)]
pub struct SinkRegistry {
    factories: BTreeMap<String, Arc<dyn SinkFactory>>,
}

impl SinkRegistry {
    /// Registry holding only the default `Null` type
    ///
    /// The default type is always registered, so an empty configuration
    /// resolves in every registry.
    pub fn minimal() -> Self {
        let null = FnSinkFactory::new(NullSink::TYPE_NAME, || Box::new(NullSink::new()));
        let mut factories: BTreeMap<String, Arc<dyn SinkFactory>> = BTreeMap::new();
        factories.insert(DEFAULT_SINK_TYPE.to_string(), Arc::new(null));
        Self { factories }
    }

    /// Registry with `Null`, `Memory` and `Disk`
    pub fn with_defaults() -> Self {
        let mut registry = Self::minimal();
        for factory in [
            FnSinkFactory::new(MemorySink::TYPE_NAME, || Box::new(MemorySink::new()))
                .programmatic_only(),
            FnSinkFactory::new(DiskSink::TYPE_NAME, || Box::new(DiskSink::default())),
        ] {
            registry.factories.insert(
                factory.type_name.to_string(),
                Arc::new(factory) as Arc<dyn SinkFactory>,
            );
        }
        registry
    }

    /// Add a new sink type
    ///
    /// # Errors
    /// `ConfigValidation` if the type name is empty or already taken.
    pub fn register<F>(&mut self, factory: F) -> Result<(), ContractError>
    where
        F: SinkFactory + 'static,
    {
        let name = factory.type_name().to_string();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ContractError::config_validation(
                "registry",
                format!("invalid sink type name '{name}'"),
            ));
        }
        if self.factories.contains_key(&name) {
            return Err(ContractError::config_validation(
                "registry",
                format!("sink type '{name}' already registered"),
            ));
        }
        self.factories.insert(name, Arc::new(factory));
        Ok(())
    }

    /// Look up the factory for `type_name`
    ///
    /// # Errors
    /// `UnknownSinkType` if nothing is registered under that name.
    pub fn resolve(&self, type_name: &str) -> Result<Arc<dyn SinkFactory>, ContractError> {
        self.factories
            .get(type_name)
            .cloned()
            .ok_or_else(|| ContractError::unknown_sink_type(type_name))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Freshly constructed default sink, built by the `DEFAULT_SINK_TYPE` factory
    pub fn default_sink(&self) -> Box<dyn Sink> {
        match self.factories.get(DEFAULT_SINK_TYPE) {
            Some(factory) => factory.new_instance(),
            None => Box::new(NullSink::new()),
        }
    }

    /// Registered names in sorted order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Names offered to interactive configuration
    pub fn interactive_type_names(&self) -> impl Iterator<Item = &str> {
        self.factories
            .iter()
            .filter(|(_, f)| f.interactive())
            .map(|(name, _)| name.as_str())
    }

    /// Descriptions of every registered type
    pub fn descriptions(&self) -> Vec<SinkDescription> {
        self.factories
            .iter()
            .map(|(name, factory)| {
                let sample = factory.new_instance();
                SinkDescription {
                    type_name: name.clone(),
                    global_info: sample.global_info().to_string(),
                    options: sample.list_options(),
                    interactive: factory.interactive(),
                }
            })
            .collect()
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("types", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
