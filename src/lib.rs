//! # recodec
//!
//! Validated record serialization: immutable records round-tripped through
//! JSON, CSV, and binary transports.
//!
//! ## Core Concepts
//!
//! - **Address**: an immutable value object compared by field equality
//! - **Record**: an identity-bearing entity with validated fields, one
//!   owned address, and a UTC creation timestamp
//! - **Codecs**: bidirectional record/transport transforms obeying the
//!   round-trip law `decode(encode(records)) == records`
//! - **RecordStore**: an ordered collection with atomic bulk import/export
//!
//! Validation happens in the record constructors and nowhere else, so the
//! decode paths can never produce an invalid record. Everything is
//! synchronous and single-threaded; share a store across threads only
//! behind an external lock.
//!
//! ## Example
//!
//! ```
//! use recodec::{Address, JsonCodec, Record, RecordStore};
//!
//! let mut store = RecordStore::new();
//! store.add(Record::new(
//!     1,
//!     "alice@example.com",
//!     Address::new("Lviv", "Ukraine", "79000"),
//! )?);
//!
//! let transport = store.export_as(&JsonCodec::new())?;
//!
//! let mut restored = RecordStore::new();
//! restored.import_from(&JsonCodec::new(), &transport)?;
//! assert_eq!(restored.all(), store.all());
//! # Ok::<(), recodec::StoreError>(())
//! ```

pub mod codec;
pub mod error;
pub mod fs;
pub mod record;
pub mod store;
pub mod types;

// Re-exports
pub use codec::{BinaryCodec, Codec, CsvCodec, JsonCodec};
pub use error::{Result, StoreError};
pub use fs::{export_to_path, import_from_path};
pub use record::{Address, Record};
pub use store::RecordStore;
pub use types::{Format, Timestamp};
