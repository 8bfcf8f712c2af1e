use super::{Record, RecordStorage, RecordValue, Recorder};
use chrono::Local;
use log::{info, warn};

/// A recorder keeping records in memory.
///
/// Written records are kept as is. Stored records are aggregated by
/// [`RecordStorage`] on every flush; the aggregate, tagged with the `episode` key
/// and the flush time under `datetime`, is then kept like a written record.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
    storage: RecordStorage,
}

impl BufferedRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the kept records, in the order they were written.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.buf.iter()
    }

    /// Returns the number of kept records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record has been kept.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Recorder for BufferedRecorder {
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }

    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, episode: usize) {
        if self.storage.is_empty() {
            return;
        }
        match self.storage.aggregate() {
            Ok(mut record) => {
                record.insert("episode", RecordValue::Scalar(episode as f32));
                record.insert("datetime", RecordValue::DateTime(Local::now()));
                info!("Flushed records at episode {}", episode);
                self.buf.push(record);
            }
            Err(e) => warn!("Failed to aggregate records at episode {}: {}", episode, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_aggregates_stored_records() {
        let mut recorder = BufferedRecorder::new();
        recorder.write(Record::from_scalar("x", 1.0));
        for v in [1.0, 2.0, 6.0] {
            recorder.store(Record::from_scalar("loss", v));
        }
        recorder.flush(9);
        recorder.flush(10);

        assert_eq!(recorder.len(), 2);
        let record = recorder.iter().last().unwrap();
        assert_eq!(record.get_scalar("episode").unwrap(), 9.0);
        assert_eq!(record.get_scalar("loss_mean").unwrap(), 3.0);
        assert_eq!(record.get_scalar("loss_min").unwrap(), 1.0);
        assert_eq!(record.get_scalar("loss_max").unwrap(), 6.0);
        assert_eq!(record.get_scalar("loss_median").unwrap(), 2.0);
        assert!(record.get_datetime("datetime").unwrap() <= Local::now());
    }
}
