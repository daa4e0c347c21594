//! Validated records and their owned value object.
//!
//! A [`Record`] is an identity-bearing entity: a non-negative id, a
//! structurally checked email, exactly one owned [`Address`], and a UTC
//! creation timestamp. Validation runs inside the constructors, so no
//! invalid instance ever exists; the codec decode paths reconstruct
//! records through the same constructors and cannot bypass the checks.

use crate::error::{Result, StoreError};
use crate::types::Timestamp;
use serde_json::{Map, Value};

/// Immutable value object with structural equality and no identity.
///
/// All fields are required at construction and never change afterwards;
/// "updating" an address means building a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    city: String,
    country: String,
    zip_code: String,
}

impl Address {
    /// Field names in declaration order. The CSV codec flattens these
    /// into sibling columns between `email` and `created_at`.
    pub(crate) const FIELDS: [&'static str; 3] = ["city", "country", "zip_code"];

    pub fn new(
        city: impl Into<String>,
        country: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Address {
            city: city.into(),
            country: country.into(),
            zip_code: zip_code.into(),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    /// Field name to string value, insertion order = declaration order.
    pub fn to_primitive(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("city".into(), Value::from(self.city.clone()));
        map.insert("country".into(), Value::from(self.country.clone()));
        map.insert("zip_code".into(), Value::from(self.zip_code.clone()));
        map
    }

    /// Rebuild from a primitive mapping. Unknown keys are ignored; an
    /// absent required key fails with [`StoreError::MissingField`].
    pub fn from_primitive(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| StoreError::Decode("value must be an object".into()))?;

        let city = require_string(obj, "city")?;
        let country = require_string(obj, "country")?;
        let zip_code = require_string(obj, "zip_code")?;

        Ok(Address {
            city,
            country,
            zip_code,
        })
    }
}

/// An identity-bearing entity owning one [`Address`].
///
/// Immutable once constructed: there are no setters, and every constructor
/// validates before an instance exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    id: i64,
    email: String,
    address: Address,
    created_at: Timestamp,
}

impl Record {
    /// Create a record, capturing the current UTC time.
    pub fn new(id: i64, email: impl Into<String>, address: Address) -> Result<Self> {
        Self::with_created_at(id, email, address, Timestamp::now())
    }

    /// Create a record with an explicit creation timestamp.
    ///
    /// Fails with [`StoreError::Validation`] if the id is negative or the
    /// email fails the structural check (exactly one `@`, at least one
    /// `.` after it). Construction never partially succeeds.
    pub fn with_created_at(
        id: i64,
        email: impl Into<String>,
        address: Address,
        created_at: Timestamp,
    ) -> Result<Self> {
        let email = email.into();
        validate_id(id)?;
        validate_email(&email)?;
        Ok(Record {
            id,
            email,
            address,
            created_at,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Primitive mapping with keys `id`, `email`, `value`, `created_at`,
    /// in that order. The owned address nests under `value`.
    pub fn to_primitive(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id));
        map.insert("email".into(), Value::from(self.email.clone()));
        map.insert("value".into(), Value::Object(self.address.to_primitive()));
        map.insert("created_at".into(), Value::from(self.created_at.to_rfc3339()));
        map
    }

    /// Rebuild from a primitive mapping, re-running constructor validation.
    ///
    /// Unknown keys are ignored for forward compatibility; required keys
    /// must be present.
    pub fn from_primitive(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| StoreError::Decode("record must be an object".into()))?;

        let id = obj
            .get("id")
            .ok_or_else(|| StoreError::MissingField("id".into()))?
            .as_i64()
            .ok_or_else(|| StoreError::validation("id", "must be an integer"))?;

        let email = require_string(obj, "email")?;

        let address = Address::from_primitive(
            obj.get("value")
                .ok_or_else(|| StoreError::MissingField("value".into()))?,
        )?;

        let created_raw = require_string(obj, "created_at")?;
        let created_at = Timestamp::parse(&created_raw)?;

        Self::with_created_at(id, email, address, created_at)
    }
}

fn require_string(obj: &Map<String, Value>, field: &str) -> Result<String> {
    obj.get(field)
        .ok_or_else(|| StoreError::MissingField(field.into()))?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| StoreError::validation(field, "must be a string"))
}

fn validate_id(id: i64) -> Result<()> {
    if id < 0 {
        return Err(StoreError::validation(
            "id",
            format!("must be non-negative, got {id}"),
        ));
    }
    Ok(())
}

// Deliberately minimal structural check: exactly one '@' and at least one
// '.' somewhere after it. Not an RFC 5322 validator.
fn validate_email(email: &str) -> Result<()> {
    let mut parts = email.splitn(2, '@');
    let _local = parts.next();
    let domain = match parts.next() {
        Some(d) => d,
        None => {
            return Err(StoreError::validation(
                "email",
                "must contain exactly one '@'",
            ))
        }
    };
    if domain.contains('@') {
        return Err(StoreError::validation(
            "email",
            "must contain exactly one '@'",
        ));
    }
    if !domain.contains('.') {
        return Err(StoreError::validation(
            "email",
            "must contain a '.' after the '@'",
        ));
    }
    Ok(())
}
