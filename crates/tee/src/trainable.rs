//! TrainableTee - dumps the training data before a model trains on it

use contracts::{ContractError, Dataset, Graphable, HostKind, Record, Trainable};
use tracing::instrument;

use crate::shared::Tee;

/// Decorator around a trainable model
///
/// Predictions are forwarded untouched; only `train` tees.
#[derive(Debug)]
pub struct TrainableTee<T> {
    inner: T,
    tee: Tee,
}

impl_tee_decorator!(TrainableTee, Trainable, HostKind::Trainable);

impl<T: Trainable> Trainable for TrainableTee<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[instrument(
        name = "trainable_tee_train",
        skip(self, data),
        fields(model = %self.inner.name(), records = data.len())
    )]
    fn train(&mut self, data: &Dataset) -> Result<(), ContractError> {
        self.tee.dump(data)?;
        self.tee.record_delegation();
        self.inner.train(data)
    }

    fn distribution(&self, record: &Record) -> Result<Vec<f64>, ContractError> {
        self.inner.distribution(record)
    }

    fn classify(&self, record: &Record) -> Result<f64, ContractError> {
        self.inner.classify(record)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn as_graphable(&self) -> Option<&dyn Graphable> {
        self.inner.as_graphable().map(|_| self as &dyn Graphable)
    }
}
