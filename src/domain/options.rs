use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::error::MockError;

/// Caller options for one `create` call
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Produce this many instances instead of one. `None` and `Some(1)` both yield a single object.
    pub count: Option<usize>,
    /// Applied after omission; a mutated key is added when absent
    pub mutations: Map<String, Value>,
    pub omit: Vec<String>,
    /// Forwarded to the value source before generation
    pub locale: Option<String>,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn mutate(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.mutations.insert(key.into(), value.into());
        self
    }

    pub fn omit<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omit.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Number of instances to generate, rejecting zero
    pub fn instances(&self) -> Result<usize, MockError> {
        match self.count {
            Some(0) => Err(MockError::InvalidOptions("count must be a positive integer".to_string())),
            Some(n) => Ok(n),
            None => Ok(1),
        }
    }

    /// Remove omitted keys, then apply mutations
    pub fn apply(&self, object: &mut Map<String, Value>) {
        for key in &self.omit {
            object.remove(key);
        }
        for (key, value) in &self.mutations {
            object.insert(key.clone(), value.clone());
        }
    }
}

/// Output of `create`: a single object unless more than one instance was requested
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Generated {
    One(Value),
    Many(Vec<Value>),
}

impl Generated {
    pub fn is_many(&self) -> bool {
        matches!(self, Generated::Many(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Generated::One(_) => 1,
            Generated::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_one(&self) -> Option<&Value> {
        match self {
            Generated::One(v) => Some(v),
            Generated::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Value]> {
        match self {
            Generated::One(_) => None,
            Generated::Many(items) => Some(items),
        }
    }

    /// Flatten into a list regardless of shape
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            Generated::One(v) => vec![v],
            Generated::Many(items) => items,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Generated::One(v) => v,
            Generated::Many(items) => Value::Array(items),
        }
    }

    /// Deserialize into `T` (an object type for one, a `Vec` for many)
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, MockError> {
        Ok(serde_json::from_value(self.into_value())?)
    }
}
