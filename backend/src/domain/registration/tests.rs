//! Behavioural coverage for the registration and check-in workflows.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::{fixture, rstest};
use serde_json::Value;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    DisabledNotifier, FixtureGuestStore, FixtureNotifier, QrRenderError,
};

/// Pass-through encoder: the "image" is the payload bytes.
struct PayloadRenderer;

impl QrRenderer for PayloadRenderer {
    fn render(&self, payload: &str) -> Result<Vec<u8>, QrRenderError> {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Encoder that always fails.
struct FailingRenderer;

impl QrRenderer for FailingRenderer {
    fn render(&self, _payload: &str) -> Result<Vec<u8>, QrRenderError> {
        Err(QrRenderError::encode("payload too long"))
    }
}

/// Store whose pre-check sees nothing but whose insert loses the uniqueness
/// race, modelling a concurrent registration between steps.
struct RacingStore;

#[async_trait]
impl GuestStore for RacingStore {
    async fn find_by_email(&self, _email: &GuestEmail) -> Result<Option<Guest>, GuestStoreError> {
        Ok(None)
    }

    async fn insert(&self, guest: NewGuest) -> Result<Guest, GuestStoreError> {
        Err(GuestStoreError::duplicate_email(guest.email().as_str()))
    }

    async fn find_by_id(&self, _id: &GuestId) -> Result<Option<Guest>, GuestStoreError> {
        Ok(None)
    }

    async fn mark_checked_in(&self, id: &GuestId) -> Result<(), GuestStoreError> {
        Err(GuestStoreError::not_found(id.to_string()))
    }

    async fn delete(&self, _id: &GuestId) -> Result<(), GuestStoreError> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Guest>, GuestStoreError> {
        Ok(Vec::new())
    }
}

fn name() -> GuestName {
    GuestName::new("Alice").expect("valid name")
}

fn email() -> GuestEmail {
    GuestEmail::new("alice@x.com").expect("valid email")
}

#[fixture]
fn store() -> Arc<FixtureGuestStore> {
    Arc::new(FixtureGuestStore::new())
}

fn service_with(
    store: Arc<FixtureGuestStore>,
    notifier: Arc<dyn crate::domain::ports::Notifier>,
) -> RegistrationService {
    RegistrationService::new(store, Arc::new(PayloadRenderer), notifier)
}

fn details_code(err: &Error) -> Option<String> {
    err.details()
        .and_then(|d| d.get("code"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[rstest]
#[tokio::test]
async fn register_persists_notifies_and_returns_the_id(store: Arc<FixtureGuestStore>) {
    let notifier = Arc::new(FixtureNotifier::new());
    let service = service_with(Arc::clone(&store), Arc::clone(&notifier) as _);

    let confirmation = service
        .register(name(), email())
        .await
        .expect("registration succeeds");

    assert_eq!(
        confirmation.qr_png,
        confirmation.guest_id.to_string().into_bytes(),
        "qr payload is the generated guest id"
    );
    let guests = store.list_all().await.expect("list succeeds");
    assert_eq!(guests.len(), 1);
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@x.com");
    assert_eq!(sent[0].attachment, confirmation.qr_png);
}

#[rstest]
#[tokio::test]
async fn second_registration_with_same_email_is_rejected(store: Arc<FixtureGuestStore>) {
    let service = service_with(Arc::clone(&store), Arc::new(FixtureNotifier::new()));
    service
        .register(name(), email())
        .await
        .expect("first registration succeeds");

    let err = service
        .register(name(), email())
        .await
        .expect_err("duplicate email is rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "This email is already registered");
    assert_eq!(details_code(&err).as_deref(), Some("already_registered"));
    assert_eq!(store.list_all().await.expect("list succeeds").len(), 1);
}

#[rstest]
#[tokio::test]
async fn losing_the_insert_race_reads_as_duplicate_not_server_error() {
    let service = RegistrationService::new(
        Arc::new(RacingStore),
        Arc::new(PayloadRenderer),
        Arc::new(FixtureNotifier::new()),
    );

    let err = service
        .register(name(), email())
        .await
        .expect_err("racing insert is rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(details_code(&err).as_deref(), Some("already_registered"));
}

#[rstest]
#[tokio::test]
async fn notification_failure_rolls_the_record_back(store: Arc<FixtureGuestStore>) {
    let service = service_with(Arc::clone(&store), Arc::new(DisabledNotifier));

    let err = service
        .register(name(), email())
        .await
        .expect_err("notification failure surfaces");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(
        store.list_all().await.expect("list succeeds").is_empty(),
        "no guest record remains after rollback"
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_rejection_applies_even_after_a_failed_delivery(store: Arc<FixtureGuestStore>) {
    // First attempt fails at the notification step and rolls back, so a
    // retry must hit the notifier again rather than the duplicate check.
    let failing = service_with(Arc::clone(&store), Arc::new(DisabledNotifier));
    failing
        .register(name(), email())
        .await
        .expect_err("first attempt fails at notification");

    let err = failing
        .register(name(), email())
        .await
        .expect_err("retry still fails at notification");
    assert_eq!(err.code(), ErrorCode::InternalError);

    // After a successful delivery the same email is rejected as duplicate.
    let working = service_with(Arc::clone(&store), Arc::new(FixtureNotifier::new()));
    working
        .register(name(), email())
        .await
        .expect("delivery now succeeds");
    let err = working
        .register(name(), email())
        .await
        .expect_err("email is now taken");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn encoder_failure_rolls_the_record_back(store: Arc<FixtureGuestStore>) {
    let service = RegistrationService::new(
        Arc::clone(&store) as _,
        Arc::new(FailingRenderer),
        Arc::new(FixtureNotifier::new()),
    );

    let err = service
        .register(name(), email())
        .await
        .expect_err("encoder failure surfaces");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(store.list_all().await.expect("list succeeds").is_empty());
}

#[rstest]
#[tokio::test]
async fn check_in_succeeds_repeatedly_for_a_registered_guest(store: Arc<FixtureGuestStore>) {
    let service = service_with(Arc::clone(&store), Arc::new(FixtureNotifier::new()));
    let confirmation = service
        .register(name(), email())
        .await
        .expect("registration succeeds");

    service
        .check_in(confirmation.guest_id)
        .await
        .expect("first check-in succeeds");
    service
        .check_in(confirmation.guest_id)
        .await
        .expect("repeat check-in succeeds");

    let guests = store.list_all().await.expect("list succeeds");
    assert!(guests[0].checked_in());
}

#[rstest]
#[tokio::test]
async fn check_in_of_unknown_id_is_not_found(store: Arc<FixtureGuestStore>) {
    let service = service_with(store, Arc::new(FixtureNotifier::new()));
    let err = service
        .check_in(GuestId::generate())
        .await
        .expect_err("unknown guest is rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Guest not found");
}

#[rstest]
#[tokio::test]
async fn list_guests_passes_the_store_contents_through(store: Arc<FixtureGuestStore>) {
    let service = service_with(Arc::clone(&store), Arc::new(FixtureNotifier::new()));
    service
        .register(name(), email())
        .await
        .expect("registration succeeds");

    let guests = service.list_guests().await.expect("listing succeeds");
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0].email().as_str(), "alice@x.com");
}
