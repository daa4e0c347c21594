//! JSON codec: a top-level array of primitive record mappings.

use crate::codec::Codec;
use crate::error::{Result, StoreError};
use crate::record::Record;
use serde_json::Value;

/// JSON transport codec.
///
/// Encodes compact by default; [`JsonCodec::pretty`] switches to two-space
/// indentation. Decoding accepts both forms, ignores unknown object keys,
/// and rejects anything that is not a top-level array of objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        JsonCodec { pretty: false }
    }

    /// Encoder variant with two-space indentation.
    pub fn pretty() -> Self {
        JsonCodec { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let array: Vec<Value> = records
            .iter()
            .map(|r| Value::Object(r.to_primitive()))
            .collect();

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&array)
        } else {
            serde_json::to_vec(&array)
        };
        bytes.map_err(|e| StoreError::Encode(e.to_string()))
    }

    fn decode(&self, transport: &[u8]) -> Result<Vec<Record>> {
        let value: Value = serde_json::from_slice(transport)
            .map_err(|e| StoreError::Decode(format!("malformed JSON: {e}")))?;

        let elements = value
            .as_array()
            .ok_or_else(|| StoreError::Decode("expected a top-level JSON array".into()))?;

        elements.iter().map(Record::from_primitive).collect()
    }
}
