use parcel_core::{Parcel, ParcelStatus};

#[test]
fn new_parcel_is_registered_and_unnumbered() {
    let parcel = Parcel::new(1000, "test");

    assert_eq!(parcel.number, 0);
    assert_eq!(parcel.client, 1000);
    assert_eq!(parcel.status, ParcelStatus::Registered);
    assert_eq!(parcel.address, "test");
    assert!(!parcel.created_at.is_empty());
}

#[test]
fn parcel_serialization_uses_column_names() {
    let mut parcel = Parcel::with_created_at(
        42,
        ParcelStatus::Sent,
        "12 Harbour Road",
        "2024-01-01T00:00:00Z",
    );
    parcel.number = 3;

    let json = serde_json::to_value(&parcel).unwrap();
    assert_eq!(json["number"], 3);
    assert_eq!(json["client"], 42);
    assert_eq!(json["status"], "sent");
    assert_eq!(json["address"], "12 Harbour Road");
    assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");

    let decoded: Parcel = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, parcel);
}

#[test]
fn caller_defined_status_serializes_as_plain_text() {
    let parcel = Parcel::with_created_at(
        1,
        ParcelStatus::from("returned"),
        "x",
        "2024-01-01T00:00:00Z",
    );

    let json = serde_json::to_value(&parcel).unwrap();
    assert_eq!(json["status"], "returned");

    let decoded: Parcel = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.status, ParcelStatus::Other("returned".to_string()));
    assert_eq!(ParcelStatus::Delivered.to_string(), "delivered");
}
