use super::{Record, Recorder};

/// A recorder that ignores any record.
#[derive(Clone, Debug, Default)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn write(&mut self, _record: Record) {}

    fn store(&mut self, _record: Record) {}

    fn flush(&mut self, _episode: usize) {}
}
