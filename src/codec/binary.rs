//! Binary codec: framed MessagePack with per-record checksums.
//!
//! Layout: 4 magic bytes, a format version byte, a little-endian u32
//! record count, then one frame per record (u32 body length, MessagePack
//! body, CRC32 of the body). The header makes foreign blobs and version
//! drift detectable; the checksum catches corruption. The format is for
//! trusted, internally produced data only: decoding re-validates every
//! record, but the framing is an integrity check, not a defense against
//! adversarial input.

use crate::codec::Codec;
use crate::error::{Result, StoreError};
use crate::record::{Address, Record};
use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// Magic bytes for a record pack blob.
const PACK_MAGIC: &[u8; 4] = b"RPK\0";

/// Current binary format version.
const PACK_VERSION: u8 = 1;

/// Sanity cap on a single frame body.
const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Binary transport codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryCodec;

/// On-wire shape of a record body. Decoded bodies go back through the
/// `Record` constructors, so the wire struct carries raw values only.
#[derive(Serialize, Deserialize)]
struct WireRecord {
    id: i64,
    email: String,
    value: WireAddress,
    created_at: String,
}

#[derive(Serialize, Deserialize)]
struct WireAddress {
    city: String,
    country: String,
    zip_code: String,
}

impl From<&Record> for WireRecord {
    fn from(record: &Record) -> Self {
        let address = record.address();
        WireRecord {
            id: record.id(),
            email: record.email().to_string(),
            value: WireAddress {
                city: address.city().to_string(),
                country: address.country().to_string(),
                zip_code: address.zip_code().to_string(),
            },
            created_at: record.created_at().to_rfc3339(),
        }
    }
}

impl WireRecord {
    fn into_record(self) -> Result<Record> {
        let created_at = Timestamp::parse(&self.created_at)?;
        Record::with_created_at(
            self.id,
            self.email,
            Address::new(self.value.city, self.value.country, self.value.zip_code),
            created_at,
        )
    }
}

impl Codec for BinaryCodec {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(PACK_MAGIC);
        out.push(PACK_VERSION);
        out.extend_from_slice(&(records.len() as u32).to_le_bytes());

        for record in records {
            let body = rmp_serde::to_vec(&WireRecord::from(record))?;
            out.extend_from_slice(&(body.len() as u32).to_le_bytes());
            out.extend_from_slice(&body);
            out.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
        }

        Ok(out)
    }

    fn decode(&self, transport: &[u8]) -> Result<Vec<Record>> {
        let mut reader = FrameReader::new(transport);

        let magic = reader.take(4, "magic")?;
        if magic != PACK_MAGIC {
            return Err(StoreError::Decode("not a record pack: bad magic".into()));
        }

        let version = reader.take(1, "version")?[0];
        if version != PACK_VERSION {
            return Err(StoreError::Decode(format!(
                "unsupported record pack version: {version}"
            )));
        }

        let count = reader.take_u32("record count")? as usize;

        let mut records = Vec::with_capacity(count.min(1024));
        for i in 0..count {
            let len = reader.take_u32("frame length")? as usize;
            if len > MAX_FRAME_LEN {
                return Err(StoreError::Decode(format!(
                    "record {i}: frame length {len} exceeds sanity cap"
                )));
            }

            let body = reader.take(len, "frame body")?;
            let stored = reader.take_u32("frame checksum")?;
            let computed = crc32fast::hash(body);
            if stored != computed {
                return Err(StoreError::Decode(format!(
                    "record {i}: checksum mismatch (expected {stored:08x}, got {computed:08x})"
                )));
            }

            let wire: WireRecord = rmp_serde::from_slice(body)?;
            records.push(wire.into_record()?);
        }

        if !reader.is_empty() {
            return Err(StoreError::Decode(format!(
                "{} trailing bytes after final record",
                reader.remaining()
            )));
        }

        Ok(records)
    }
}

/// Cursor over a transport blob that turns short reads into decode errors.
struct FrameReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        FrameReader { data, pos: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).filter(|&e| e <= self.data.len());
        match end {
            Some(end) => {
                let slice = &self.data[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(StoreError::Decode(format!(
                "truncated blob: expected {len} bytes for {what}, {} left",
                self.data.len() - self.pos
            ))),
        }
    }

    fn take_u32(&mut self, what: &str) -> Result<u32> {
        let bytes = self.take(4, what)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}
