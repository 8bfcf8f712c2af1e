use super::Record;

/// Destination of the records produced while learning.
pub trait Recorder {
    /// Writes a record immediately.
    fn write(&mut self, record: Record);

    /// Stores a record for later aggregation.
    fn store(&mut self, record: Record);

    /// Aggregates the stored records and writes the result, tagged with `episode`.
    fn flush(&mut self, episode: usize);
}
