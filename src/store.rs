//! Ordered in-memory record collection with bulk import/export.

use crate::codec::Codec;
use crate::error::Result;
use crate::record::Record;
use tracing::debug;

/// An ordered, single-owner collection of records.
///
/// Insertion order is preserved and [`add`](RecordStore::add) never
/// deduplicates; [`add_unique`](RecordStore::add_unique) is the explicit
/// opt-in dedup path. The store is not synchronized; concurrent mutation
/// requires an external lock held around `add`/`export_as`/`import_from`.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }

    /// Append a record. O(1) amortized, keeps duplicates.
    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Append only if no record with the same id exists yet.
    ///
    /// Returns whether the record was added.
    pub fn add_unique(&mut self, record: Record) -> bool {
        if self.contains_id(record.id()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given id, if any.
    pub fn find_by_id(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Remove all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Encode the full collection through the given codec.
    pub fn export_as(&self, codec: &dyn Codec) -> Result<Vec<u8>> {
        debug!(codec = codec.name(), records = self.len(), "exporting records");
        codec.encode(self.all())
    }

    /// Decode a transport and append every resulting record.
    ///
    /// All-or-nothing: if the decode fails, the store is left untouched.
    /// Returns the number of records appended.
    pub fn import_from(&mut self, codec: &dyn Codec, transport: &[u8]) -> Result<usize> {
        let decoded = codec.decode(transport)?;
        let imported = decoded.len();
        self.records.extend(decoded);
        debug!(codec = codec.name(), imported, "imported records");
        Ok(imported)
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        RecordStore { records }
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        RecordStore {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordStore {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
