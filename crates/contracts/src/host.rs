//! Host component traits
//!
//! The narrow capability sets a tee decorator needs from the component it wraps.
//! The algorithms behind them are opaque to this workspace.

use crate::{ContractError, Dataset, OptionList, Record};

/// Component configured from option tokens
pub trait Configurable {
    /// Take the options this component understands
    ///
    /// Tokens left untouched are reported by the caller.
    fn set_options(&mut self, _options: &mut OptionList) -> Result<(), ContractError> {
        Ok(())
    }

    /// Current option tokens
    fn options(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Kind of graph a component can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphType {
    #[default]
    NotDrawable,
    Tree,
    BayesNet,
    Newick,
}

/// Optional capability: render the built model as a graph
pub trait Graphable {
    fn graph_type(&self) -> GraphType;

    /// Graph in dot (or the format named by `graph_type`)
    fn graph(&self) -> Result<String, ContractError>;
}

/// Trainable model (classifier or regressor)
pub trait Trainable: Configurable + Send {
    fn name(&self) -> &str;

    fn train(&mut self, data: &Dataset) -> Result<(), ContractError>;

    /// Class distribution, or a single value for regression
    fn distribution(&self, record: &Record) -> Result<Vec<f64>, ContractError>;

    /// Predicted label index, regression value, or NaN when undecided
    fn classify(&self, record: &Record) -> Result<f64, ContractError> {
        let dist = self.distribution(record)?;
        if dist.len() == 1 {
            return Ok(dist[0]);
        }
        Ok(max_index(&dist).map_or(f64::NAN, |i| i as f64))
    }

    /// Model description
    fn describe(&self) -> String {
        self.name().to_string()
    }

    fn as_graphable(&self) -> Option<&dyn Graphable> {
        None
    }
}

/// Cluster model
pub trait Clusterable: Configurable + Send {
    fn name(&self) -> &str;

    fn build(&mut self, data: &Dataset) -> Result<(), ContractError>;

    /// Membership distribution over clusters
    fn distribution(&self, record: &Record) -> Result<Vec<f64>, ContractError>;

    fn number_of_clusters(&self) -> Result<usize, ContractError>;

    /// Most likely cluster
    fn cluster(&self, record: &Record) -> Result<usize, ContractError> {
        let dist = self.distribution(record)?;
        max_index(&dist)
            .ok_or_else(|| ContractError::host(self.name(), "record not assigned to any cluster"))
    }

    fn describe(&self) -> String {
        self.name().to_string()
    }

    fn as_graphable(&self) -> Option<&dyn Graphable> {
        None
    }
}

/// Batch transformer (filter)
pub trait BatchTransformable: Configurable + Send {
    fn name(&self) -> &str;

    /// Transform a whole batch
    fn process(&mut self, data: &Dataset) -> Result<Dataset, ContractError>;

    fn describe(&self) -> String {
        self.name().to_string()
    }

    fn as_graphable(&self) -> Option<&dyn Graphable> {
        None
    }
}

/// Index of the largest positive entry
fn max_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > 0.0)
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if b >= *v => best,
            _ => Some((i, *v)),
        })
        .map(|(i, _)| i)
}
