//! Registration, check-in, and admin query workflows.
//!
//! Registration is a manual saga over three ports: insert the guest record,
//! render the QR image, deliver it by email, and compensate with a delete
//! when a post-insert step fails. The guest is never left half-registered:
//! either the record exists and the email was sent, or neither survives.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{GuestStore, GuestStoreError, Notifier, QrRenderer};
use crate::domain::{Error, Guest, GuestEmail, GuestId, GuestName, NewGuest};

/// Successful registration outcome returned to the caller as confirmation
/// and fallback display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationConfirmation {
    /// The server-generated guest identifier.
    pub guest_id: GuestId,
    /// The rendered QR image, PNG-encoded.
    pub qr_png: Vec<u8>,
}

/// Orchestrates the guest store, QR renderer, and notifier.
///
/// Shared across requests as `Arc<RegistrationService>`; all state lives
/// behind the ports.
pub struct RegistrationService {
    store: Arc<dyn GuestStore>,
    renderer: Arc<dyn QrRenderer>,
    notifier: Arc<dyn Notifier>,
}

impl RegistrationService {
    /// Wire the service against its three ports.
    #[must_use]
    pub fn new(
        store: Arc<dyn GuestStore>,
        renderer: Arc<dyn QrRenderer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            renderer,
            notifier,
        }
    }

    /// Register a new guest and email them their QR code.
    ///
    /// The duplicate pre-check is an optimisation only; a uniqueness
    /// violation at insert time (the race window past the pre-check) is
    /// reported identically to the pre-check rejection, not as a server
    /// error.
    ///
    /// # Errors
    /// - [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode) when the
    ///   email is already registered.
    /// - [`ErrorCode::InternalError`](crate::domain::ErrorCode) when the
    ///   store, encoder, or mail transport fails; post-insert failures roll
    ///   the inserted record back first.
    pub async fn register(
        &self,
        name: GuestName,
        email: GuestEmail,
    ) -> Result<RegistrationConfirmation, Error> {
        if let Some(existing) = self
            .store
            .find_by_email(&email)
            .await
            .map_err(store_error)?
        {
            info!(guest_id = %existing.id(), "registration rejected: email already registered");
            return Err(already_registered());
        }

        let guest_id = GuestId::generate();
        let new_guest = NewGuest::new(guest_id, name.clone(), email.clone());
        self.store.insert(new_guest).await.map_err(|err| match err {
            GuestStoreError::DuplicateEmail { .. } => already_registered(),
            other => store_error(other),
        })?;

        let qr_png = match self.renderer.render(&guest_id.to_string()) {
            Ok(png) => png,
            Err(err) => {
                error!(%guest_id, error = %err, "qr rendering failed");
                self.compensate(guest_id).await;
                return Err(Error::internal("Failed to generate QR code"));
            }
        };

        if let Err(err) = self.notifier.send_qr_email(&email, &name, &qr_png).await {
            error!(%guest_id, error = %err, "notification failed; rolling back registration");
            self.compensate(guest_id).await;
            return Err(Error::internal("Failed to send email with QR code"));
        }

        info!(%guest_id, "guest registered and notified");
        Ok(RegistrationConfirmation { guest_id, qr_png })
    }

    /// Mark a guest as arrived.
    ///
    /// Repeated check-ins report success without distinguishing "was already
    /// checked in" from "freshly checked in".
    ///
    /// # Errors
    /// [`ErrorCode::NotFound`](crate::domain::ErrorCode) when no guest
    /// carries the id.
    pub async fn check_in(&self, id: GuestId) -> Result<(), Error> {
        let Some(_) = self.store.find_by_id(&id).await.map_err(store_error)? else {
            return Err(Error::not_found("Guest not found"));
        };
        self.store
            .mark_checked_in(&id)
            .await
            .map_err(|err| match err {
                GuestStoreError::NotFound { .. } => Error::not_found("Guest not found"),
                other => store_error(other),
            })?;
        info!(guest_id = %id, "guest checked in");
        Ok(())
    }

    /// Return all guest records for the admin listing.
    ///
    /// # Errors
    /// [`ErrorCode::InternalError`](crate::domain::ErrorCode) on store
    /// failure.
    pub async fn list_guests(&self) -> Result<Vec<Guest>, Error> {
        self.store.list_all().await.map_err(store_error)
    }

    /// Compensating delete for a post-insert failure.
    ///
    /// A failed delete leaves an orphaned row; it is logged with the guest
    /// id for manual reconciliation rather than retried.
    async fn compensate(&self, guest_id: GuestId) {
        if let Err(err) = self.store.delete(&guest_id).await {
            error!(
                %guest_id,
                error = %err,
                "compensating delete failed; guest row requires manual reconciliation"
            );
        }
    }
}

fn already_registered() -> Error {
    Error::invalid_request("This email is already registered").with_details(json!({
        "field": "email",
        "code": "already_registered",
    }))
}

fn store_error(err: GuestStoreError) -> Error {
    // Redacted at the HTTP boundary; the detail stays in logs and traces.
    Error::internal(err.to_string())
}

#[cfg(test)]
mod tests;
