//! BatchTee - dumps each batch before a transformer processes it

use contracts::{BatchTransformable, Configurable, ContractError, Dataset, Graphable, HostKind};
use tracing::instrument;

use crate::shared::Tee;

/// Decorator around a batch transformer
///
/// The transformer's output is returned as is.
#[derive(Debug)]
pub struct BatchTee<F> {
    inner: F,
    tee: Tee,
}

impl_tee_decorator!(BatchTee, BatchTransformable, HostKind::BatchTransformable);

impl BatchTee<PassThrough> {
    /// Filter that only forwards its input to the sink
    pub fn pass_through() -> Self {
        Self::new(PassThrough)
    }
}

impl<F: BatchTransformable> BatchTransformable for BatchTee<F> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[instrument(
        name = "batch_tee_process",
        skip(self, data),
        fields(filter = %self.inner.name(), records = data.len())
    )]
    fn process(&mut self, data: &Dataset) -> Result<Dataset, ContractError> {
        self.tee.dump(data)?;
        self.tee.record_delegation();
        self.inner.process(data)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn as_graphable(&self) -> Option<&dyn Graphable> {
        self.inner.as_graphable().map(|_| self as &dyn Graphable)
    }
}

/// Transformer that returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Configurable for PassThrough {}

impl BatchTransformable for PassThrough {
    fn name(&self) -> &str {
        "PassThrough"
    }

    fn process(&mut self, data: &Dataset) -> Result<Dataset, ContractError> {
        Ok(data.clone())
    }

    fn describe(&self) -> String {
        "Only forwards the data to the dumper.".to_string()
    }
}
