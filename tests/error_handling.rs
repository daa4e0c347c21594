//! Error taxonomy and edge case tests.

use recodec::{
    Address, BinaryCodec, Codec, CsvCodec, JsonCodec, Record, RecordStore, StoreError, Timestamp,
};

fn lviv() -> Address {
    Address::new("Lviv", "Ukraine", "79000")
}

// --- Validation Errors ---

#[test]
fn test_negative_id_mentions_field() {
    let err = Record::new(-1, "a@b.com", lviv()).unwrap_err();
    match err {
        StoreError::Validation { ref field, .. } => {
            assert_eq!(field, "id");
            assert!(err.to_string().contains("id"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_bad_email_mentions_field() {
    let err = Record::new(2, "no-at-sign", lviv()).unwrap_err();
    match err {
        StoreError::Validation { ref field, .. } => {
            assert_eq!(field, "email");
            assert!(err.to_string().contains("email"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_zero_id_is_valid() {
    assert!(Record::new(0, "a@b.com", lviv()).is_ok());
}

#[test]
fn test_minimal_email_is_valid() {
    // The structural check is deliberately loose.
    assert!(Record::new(1, "a@b.c", lviv()).is_ok());
}

// --- Missing Field Errors ---

#[test]
fn test_json_missing_created_at() {
    let blob = br#"[{"id":1,"email":"a@b.com","value":{"city":"Lviv","country":"Ukraine","zip_code":"79000"}}]"#;

    let err = JsonCodec::new().decode(blob).unwrap_err();
    match err {
        StoreError::MissingField(ref name) => {
            assert_eq!(name, "created_at");
            assert!(err.to_string().contains("created_at"));
        }
        other => panic!("expected missing field error, got {other:?}"),
    }
}

#[test]
fn test_json_missing_nested_value_field() {
    let blob = br#"[{"id":1,"email":"a@b.com","value":{"city":"Lviv","country":"Ukraine"},"created_at":"2024-01-15T10:00:00+00:00"}]"#;

    let err = JsonCodec::new().decode(blob).unwrap_err();
    assert!(matches!(err, StoreError::MissingField(name) if name == "zip_code"));
}

#[test]
fn test_missing_field_distinct_from_validation() {
    // Absent field: MissingField. Present but invalid: Validation.
    let absent = br#"[{"email":"a@b.com","value":{"city":"Lviv","country":"Ukraine","zip_code":"79000"},"created_at":"2024-01-15T10:00:00+00:00"}]"#;
    let invalid = br#"[{"id":-3,"email":"a@b.com","value":{"city":"Lviv","country":"Ukraine","zip_code":"79000"},"created_at":"2024-01-15T10:00:00+00:00"}]"#;

    assert!(matches!(
        JsonCodec::new().decode(absent).unwrap_err(),
        StoreError::MissingField(name) if name == "id"
    ));
    assert!(matches!(
        JsonCodec::new().decode(invalid).unwrap_err(),
        StoreError::Validation { field, .. } if field == "id"
    ));
}

// --- Decode Errors ---

#[test]
fn test_json_parse_failure() {
    let err = JsonCodec::new().decode(b"not json at all").unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[test]
fn test_csv_row_error_carries_row_number() {
    let blob = "id,email,city,country,zip_code,created_at\n\
                1,a@b.com,Lviv,Ukraine,79000,2024-01-15T10:00:00+00:00\n\
                2,b@b.com,Kyiv,Ukraine,01001,2024-01-15T10:00:00+00:00\n\
                3,c@b.com,Odesa\n";

    let err = CsvCodec.decode(blob.as_bytes()).unwrap_err();
    match err {
        StoreError::Decode(msg) => assert!(msg.contains("row 3"), "message was: {msg}"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn test_binary_foreign_blob() {
    let err = BinaryCodec.decode(b"\x89PNG\r\n\x1a\n....").unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[test]
fn test_bad_timestamp_rejected_everywhere() {
    let json = br#"[{"id":1,"email":"a@b.com","value":{"city":"Lviv","country":"Ukraine","zip_code":"79000"},"created_at":"not-a-date"}]"#;
    let csv = "id,email,city,country,zip_code,created_at\n\
               1,a@b.com,Lviv,Ukraine,79000,not-a-date\n";

    assert!(matches!(
        JsonCodec::new().decode(json).unwrap_err(),
        StoreError::Validation { field, .. } if field == "created_at"
    ));
    assert!(matches!(
        CsvCodec.decode(csv.as_bytes()).unwrap_err(),
        StoreError::Validation { field, .. } if field == "created_at"
    ));
}

// --- Atomic Import ---

#[test]
fn test_atomic_import_from_empty_store() {
    let blob = "id,email,city,country,zip_code,created_at\n\
                1,a@b.com,Lviv,Ukraine,79000,2024-01-15T10:00:00+00:00\n\
                2,b@b.com,Kyiv,Ukraine,01001,2024-01-15T10:00:00+00:00\n\
                3,c@b.com,Odesa,Ukraine\n";

    let mut store = RecordStore::new();
    assert!(store.import_from(&CsvCodec, blob.as_bytes()).is_err());
    assert!(store.is_empty());
}

#[test]
fn test_atomic_import_keeps_prior_records_only() {
    let mut store = RecordStore::new();
    store.add(
        Record::with_created_at(
            10,
            "existing@example.com",
            lviv(),
            Timestamp::parse("2023-12-31T23:59:59+00:00").unwrap(),
        )
        .unwrap(),
    );

    // Second record is invalid: decode succeeds structurally but
    // validation fails, and nothing may be appended.
    let blob = br#"[
        {"id":1,"email":"a@b.com","value":{"city":"Lviv","country":"Ukraine","zip_code":"79000"},"created_at":"2024-01-15T10:00:00+00:00"},
        {"id":2,"email":"broken","value":{"city":"Kyiv","country":"Ukraine","zip_code":"01001"},"created_at":"2024-01-15T10:00:00+00:00"}
    ]"#;

    assert!(store.import_from(&JsonCodec::new(), blob).is_err());
    assert_eq!(store.len(), 1);
    assert_eq!(store.all()[0].id(), 10);
}

// --- No Partial Construction ---

#[test]
fn test_validation_is_fail_fast() {
    // Both fields invalid: the first failing check reports, and no
    // record instance ever exists either way.
    let result = Record::new(-1, "not-an-email", lviv());
    assert!(result.is_err());
}
