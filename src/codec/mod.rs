//! Bidirectional transforms between records and transport bytes.
//!
//! Each codec upholds the same contract: `decode(encode(records))` yields
//! a structurally equal sequence in the same order, and every decoded
//! record passes full [`Record`](crate::Record) validation. Encoding
//! already-validated records is not expected to fail; decoding is the only
//! failure point and maps every malformed input into
//! [`StoreError::Decode`](crate::StoreError::Decode) (or the validation
//! errors re-raised by record reconstruction) rather than panicking.

mod binary;
mod csv;
mod json;

pub use binary::BinaryCodec;
pub use csv::CsvCodec;
pub use json::JsonCodec;

use crate::error::Result;
use crate::record::Record;

/// A bidirectional record/transport transform.
///
/// Transports are byte sequences; the JSON and CSV codecs produce UTF-8
/// text, the binary codec an opaque framed blob.
pub trait Codec {
    /// Short format name, used for diagnostics.
    fn name(&self) -> &'static str;

    /// Encode records in input order.
    fn encode(&self, records: &[Record]) -> Result<Vec<u8>>;

    /// Decode records in encoded order, re-validating each one.
    fn decode(&self, transport: &[u8]) -> Result<Vec<Record>>;
}
