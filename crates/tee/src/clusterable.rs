//! ClusterableTee - dumps the data a cluster model is built from

use contracts::{Clusterable, ContractError, Dataset, Graphable, HostKind, Record};
use tracing::instrument;

use crate::shared::Tee;

/// Decorator around a cluster model
#[derive(Debug)]
pub struct ClusterableTee<C> {
    inner: C,
    tee: Tee,
}

impl_tee_decorator!(ClusterableTee, Clusterable, HostKind::Clusterable);

impl<C: Clusterable> Clusterable for ClusterableTee<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    #[instrument(
        name = "clusterable_tee_build",
        skip(self, data),
        fields(model = %self.inner.name(), records = data.len())
    )]
    fn build(&mut self, data: &Dataset) -> Result<(), ContractError> {
        self.tee.dump(data)?;
        self.tee.record_delegation();
        self.inner.build(data)
    }

    fn distribution(&self, record: &Record) -> Result<Vec<f64>, ContractError> {
        self.inner.distribution(record)
    }

    fn number_of_clusters(&self) -> Result<usize, ContractError> {
        self.inner.number_of_clusters()
    }

    fn cluster(&self, record: &Record) -> Result<usize, ContractError> {
        self.inner.cluster(record)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn as_graphable(&self) -> Option<&dyn Graphable> {
        self.inner.as_graphable().map(|_| self as &dyn Graphable)
    }
}
