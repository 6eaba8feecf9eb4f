//! Regression coverage for guest field validation.

use rstest::rstest;

use super::*;

#[rstest]
fn generated_ids_are_canonical_uuids() {
    let id = GuestId::generate();
    let parsed = Uuid::parse_str(&id.to_string()).expect("canonical UUID form");
    assert_eq!(&parsed, id.as_uuid());
}

#[rstest]
#[case("")]
#[case("   ")]
fn guest_id_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(GuestId::parse(raw), Err(GuestIdValidationError::Missing));
}

#[rstest]
#[case("not-a-uuid")]
#[case("123e4567")]
fn guest_id_rejects_malformed_input(#[case] raw: &str) {
    assert_eq!(GuestId::parse(raw), Err(GuestIdValidationError::Invalid));
}

#[rstest]
fn guest_id_parse_trims_whitespace() {
    let id = GuestId::generate();
    let padded = format!("  {id}  ");
    assert_eq!(GuestId::parse(&padded), Ok(id));
}

#[rstest]
fn guest_id_serde_round_trips_through_string_form() {
    let id = GuestId::generate();
    let json = serde_json::to_string(&id).expect("serialise id");
    assert_eq!(json, format!("\"{id}\""));
    let back: GuestId = serde_json::from_str(&json).expect("deserialise id");
    assert_eq!(back, id);
}

#[rstest]
#[case("")]
#[case("  \t ")]
fn guest_name_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(GuestName::new(raw), Err(GuestNameValidationError::Empty));
}

#[rstest]
fn guest_name_trims_surrounding_whitespace() {
    let name = GuestName::new("  Alice  ").expect("non-empty name");
    assert_eq!(name.as_str(), "Alice");
}

#[rstest]
#[case("")]
#[case("   ")]
fn guest_email_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(GuestEmail::new(raw), Err(GuestEmailValidationError::Empty));
}

#[rstest]
#[case("missing-at-sign")]
#[case("@no-local")]
#[case("no-domain@")]
fn guest_email_rejects_structurally_invalid_addresses(#[case] raw: &str) {
    assert_eq!(
        GuestEmail::new(raw),
        Err(GuestEmailValidationError::Malformed)
    );
}

#[rstest]
fn guest_email_accepts_minimal_address() {
    let email = GuestEmail::new(" alice@x.com ").expect("valid address");
    assert_eq!(email.as_str(), "alice@x.com");
}

#[rstest]
fn qr_payload_equals_id_string() {
    let id = GuestId::generate();
    let new_guest = NewGuest::new(
        id,
        GuestName::new("Alice").expect("valid name"),
        GuestEmail::new("alice@x.com").expect("valid email"),
    );
    assert_eq!(new_guest.qr_code_data(), id.to_string());
}

#[rstest]
fn check_in_transition_is_one_way() {
    let mut guest = Guest::from_parts(
        GuestId::generate(),
        GuestName::new("Alice").expect("valid name"),
        GuestEmail::new("alice@x.com").expect("valid email"),
        false,
        None,
    );
    assert!(!guest.checked_in());
    guest.mark_checked_in();
    assert!(guest.checked_in());
    guest.mark_checked_in();
    assert!(guest.checked_in());
}
