//! NullSink - the default, does nothing

use std::any::Any;

use contracts::{Dataset, DumpError, Sink};

/// Sink that discards every dataset
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    pub const TYPE_NAME: &'static str = "Null";

    pub fn new() -> Self {
        Self
    }
}

impl Sink for NullSink {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn global_info(&self) -> &str {
        "Dummy sink, does nothing."
    }

    fn dump(&mut self, _data: &Dataset) -> Result<(), DumpError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
