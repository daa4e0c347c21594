//! File boundary helpers.
//!
//! The store and codecs never touch the filesystem themselves; these
//! helpers are the external collaborator that moves transports between a
//! [`RecordStore`] and a file using std's synchronous file APIs.

use crate::codec::Codec;
use crate::error::Result;
use crate::store::RecordStore;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Encode the store through `codec` and write the transport to `path`.
pub fn export_to_path(
    store: &RecordStore,
    codec: &dyn Codec,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let transport = store.export_as(codec)?;
    fs::write(path, &transport)?;
    debug!(codec = codec.name(), path = %path.display(), bytes = transport.len(), "wrote transport");
    Ok(())
}

/// Read a transport from `path` and import it into the store.
///
/// Inherits the all-or-nothing guarantee of
/// [`RecordStore::import_from`]: on a decode failure nothing is appended.
/// Returns the number of records appended.
pub fn import_from_path(
    store: &mut RecordStore,
    codec: &dyn Codec,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let path = path.as_ref();
    let transport = fs::read(path)?;
    debug!(codec = codec.name(), path = %path.display(), bytes = transport.len(), "read transport");
    store.import_from(codec, &transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BinaryCodec, CsvCodec};
    use crate::error::StoreError;
    use crate::record::{Address, Record};
    use tempfile::TempDir;

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.add(Record::new(1, "alice@example.com", Address::new("Lviv", "Ukraine", "79000")).unwrap());
        store.add(Record::new(2, "bob@example.com", Address::new("Warsaw", "Poland", "00-001")).unwrap());
        store
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.csv");

        let store = sample_store();
        export_to_path(&store, &CsvCodec, &path).unwrap();

        let mut restored = RecordStore::new();
        let imported = import_from_path(&mut restored, &CsvCodec, &path).unwrap();
        assert_eq!(imported, 2);
        assert_eq!(restored.all(), store.all());
    }

    #[test]
    fn test_binary_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.bin");

        let store = sample_store();
        export_to_path(&store, &BinaryCodec, &path).unwrap();

        let mut restored = RecordStore::new();
        import_from_path(&mut restored, &BinaryCodec, &path).unwrap();
        assert_eq!(restored.all(), store.all());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new();

        let err = import_from_path(&mut store, &CsvCodec, dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(store.is_empty());
    }
}
