//! Driven port for delivering the QR code to a guest's email address.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::define_port_error;
use crate::domain::{GuestEmail, GuestName};

define_port_error! {
    /// Single failure condition for notification delivery.
    ///
    /// Transport, authentication, and attachment errors all collapse into
    /// this variant; the caller's only recourse is the same compensating
    /// rollback regardless of the cause.
    pub enum NotifierError {
        /// The message could not be composed or transmitted.
        Failed { message: String } => "notification failed: {message}",
    }
}

/// Send the registration QR code to a guest.
///
/// Delivery is best-effort and synchronous from the caller's perspective:
/// the registration request blocks until the remote transmission completes
/// or errors. There is no retry or queue.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Compose the fixed-template message, attach the PNG, and transmit it.
    async fn send_qr_email(
        &self,
        to: &GuestEmail,
        guest_name: &GuestName,
        png: &[u8],
    ) -> Result<(), NotifierError>;
}

/// Notifier wired when mail credentials are absent from configuration.
///
/// Every send fails, so each registration fails at the notification step and
/// rolls back rather than the process refusing to boot.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_qr_email(
        &self,
        _to: &GuestEmail,
        _guest_name: &GuestName,
        _png: &[u8],
    ) -> Result<(), NotifierError> {
        Err(NotifierError::failed("email delivery is not configured"))
    }
}

/// A message captured by [`FixtureNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Recipient address.
    pub to: String,
    /// Recipient display name used in the template.
    pub guest_name: String,
    /// The attached PNG bytes.
    pub attachment: Vec<u8>,
}

/// Recording notifier that accepts every send; the default test substrate.
#[derive(Debug, Default)]
pub struct FixtureNotifier {
    sent: Mutex<Vec<SentEmail>>,
}

impl FixtureNotifier {
    /// Create a notifier with an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the messages delivered so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox().clone()
    }

    fn outbox(&self) -> MutexGuard<'_, Vec<SentEmail>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Notifier for FixtureNotifier {
    async fn send_qr_email(
        &self,
        to: &GuestEmail,
        guest_name: &GuestName,
        png: &[u8],
    ) -> Result<(), NotifierError> {
        self.outbox().push(SentEmail {
            to: to.as_str().to_owned(),
            guest_name: guest_name.as_str().to_owned(),
            attachment: png.to_vec(),
        });
        Ok(())
    }
}
