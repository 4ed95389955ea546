//! Dataset - the tabular value flowing through a pipeline
//!
//! Sinks and tee decorators never look inside a dataset, they only pass it on.
//! Uses `Arc` internally so handing a dataset to a sink is a reference-count bump.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Column type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Real-valued column
    Numeric,
    /// Column restricted to a fixed set of labels
    Nominal(Vec<String>),
    /// Free text column
    Text,
}

/// Named, typed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    pub fn nominal<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal(labels.into_iter().map(Into::into).collect()),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Text,
        }
    }
}

/// Single cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Label(String),
    Missing,
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Label(v.to_string())
    }
}

/// One row of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct DatasetInner {
    relation: String,
    attributes: Vec<Attribute>,
    records: Vec<Record>,
    class_index: Option<usize>,
}

/// Immutable tabular dataset with cheap cloning.
///
/// # Examples
/// ```
/// use contracts::{Attribute, Dataset, Record};
///
/// let data = Dataset::new("iris", vec![Attribute::numeric("petal")], vec![Record::default()]);
/// let shared = data.clone(); // O(1)
/// assert!(data.same_snapshot(&shared));
/// ```
#[derive(Clone)]
pub struct Dataset(Arc<DatasetInner>);

impl Dataset {
    /// Create a dataset without a designated label column
    pub fn new(
        relation: impl Into<String>,
        attributes: Vec<Attribute>,
        records: Vec<Record>,
    ) -> Self {
        Self(Arc::new(DatasetInner {
            relation: relation.into(),
            attributes,
            records,
            class_index: None,
        }))
    }

    /// Dataset with no columns and no rows
    pub fn empty(relation: impl Into<String>) -> Self {
        Self::new(relation, Vec::new(), Vec::new())
    }

    /// Return a copy that designates `index` as the label column
    pub fn with_class_index(self, index: usize) -> Self {
        let inner = Arc::try_unwrap(self.0).unwrap_or_else(|shared| DatasetInner {
            relation: shared.relation.clone(),
            attributes: shared.attributes.clone(),
            records: shared.records.clone(),
            class_index: shared.class_index,
        });
        Self(Arc::new(DatasetInner {
            class_index: Some(index),
            ..inner
        }))
    }

    pub fn relation(&self) -> &str {
        &self.0.relation
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.0.attributes
    }

    pub fn records(&self) -> &[Record] {
        &self.0.records
    }

    pub fn class_index(&self) -> Option<usize> {
        self.0.class_index
    }

    pub fn len(&self) -> usize {
        self.0.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.records.is_empty()
    }

    /// True when both handles point at the same snapshot
    pub fn same_snapshot(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("relation", &self.0.relation)
            .field("attributes", &self.0.attributes.len())
            .field("records", &self.0.records.len())
            .field("class_index", &self.0.class_index)
            .finish()
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same snapshot
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

// Serde support
impl Serialize for Dataset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = DatasetInner::deserialize(deserializer)?;
        Ok(Self(Arc::new(inner)))
    }
}
