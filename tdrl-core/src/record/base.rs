//! Key-value records.
use crate::error::TdError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{IntoIter, Iter, Keys},
    HashMap,
};

/// Value stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A scalar metric such as a return or a loss.
    Scalar(f32),

    /// A timestamp.
    DateTime(DateTime<Local>),

    /// A vector, e.g. action values at the initial state.
    Array1(Vec<f32>),
}

impl RecordValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "Scalar",
            Self::DateTime(_) => "DateTime",
            Self::Array1(_) => "Array1",
        }
    }
}

/// A map from string keys to [`RecordValue`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record holding a single scalar.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'_, String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a value, replacing any previous value of the key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over key-value pairs.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns the value of a key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records. Values of `record` win on duplicate keys.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges `record` into `self`. Values of `record` win on duplicate keys.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    /// Returns the scalar stored under `k`.
    pub fn get_scalar(&self, k: &str) -> Result<f32, TdError> {
        match self.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(v) => Err(mismatch(k, "Scalar", v)),
            None => Err(TdError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the vector stored under `k`.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, TdError> {
        match self.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(v) => Err(mismatch(k, "Array1", v)),
            None => Err(TdError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the timestamp stored under `k`.
    pub fn get_datetime(&self, k: &str) -> Result<DateTime<Local>, TdError> {
        match self.get(k) {
            Some(RecordValue::DateTime(t)) => Ok(*t),
            Some(v) => Err(mismatch(k, "DateTime", v)),
            None => Err(TdError::RecordKeyError(k.to_string())),
        }
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Record {
    type Item = (String, RecordValue);
    type IntoIter = IntoIter<String, RecordValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn mismatch(k: &str, expected: &str, v: &RecordValue) -> TdError {
    TdError::RecordValueTypeError(format!(
        "{}: expected {}, found {}",
        k,
        expected,
        v.type_name()
    ))
}
