//! Aggregation of stored records.
use super::{Record, RecordValue};
use crate::error::TdError;
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// Stores records and aggregates them key by key.
///
/// Scalars stored more than once are summarized by `<key>_min`, `<key>_max`,
/// `<key>_mean` and `<key>_median`; a scalar stored once keeps its key. For every
/// other value type, the most recent value is kept.
#[derive(Default)]
pub struct RecordStorage {
    data: Vec<Record>,
}

fn summarize(key: &str, mut vs: Vec<f32>) -> Record {
    if vs.len() == 1 {
        return Record::from_scalar(key, vs[0]);
    }
    let mean = vs.iter().sum::<f32>() / vs.len() as f32;
    vs.sort_by(|x, y| x.total_cmp(y));
    Record::from_slice(&[
        (format!("{}_min", key), RecordValue::Scalar(vs[0])),
        (format!("{}_max", key), RecordValue::Scalar(vs[vs.len() - 1])),
        (format!("{}_mean", key), RecordValue::Scalar(mean)),
        (format!("{}_median", key), RecordValue::Scalar(vs[vs.len() / 2])),
    ])
}

fn keys(data: &[Record]) -> HashSet<String, Xxh3Builder> {
    let mut keys = HashSet::<String, Xxh3Builder>::default();
    for record in data.iter() {
        keys.extend(record.keys().cloned());
    }
    keys
}

impl RecordStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    /// Returns `true` if no record is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Aggregates all stored records into one and empties the storage.
    ///
    /// Fails if a key is stored with a scalar in one record and another type in another.
    pub fn aggregate(&mut self) -> Result<Record, TdError> {
        let data = std::mem::take(&mut self.data);
        let mut record = Record::empty();

        for key in keys(&data) {
            let values = data.iter().filter_map(|r| r.get(&key)).collect::<Vec<_>>();
            match values[0] {
                RecordValue::Scalar(_) => {
                    let vs = values
                        .iter()
                        .map(|v| match v {
                            RecordValue::Scalar(x) => Ok(*x),
                            _ => Err(TdError::RecordValueTypeError(format!(
                                "{}: mixed scalar and non-scalar values",
                                key
                            ))),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    record.merge_inplace(summarize(&key, vs));
                }
                _ => {
                    let last = values[values.len() - 1].clone();
                    record.insert(key, last);
                }
            }
        }

        Ok(record)
    }
}
