//! SMTP delivery of registration QR codes via `lettre`.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::ports::{Notifier, NotifierError};
use crate::domain::{GuestEmail, GuestName};

const SUBJECT: &str = "Your wedding registration QR code";
const ATTACHMENT_NAME: &str = "qr-code.png";

/// Connection and identity settings for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// Relay hostname.
    pub server: String,
    /// Relay port; STARTTLS is negotiated on connect.
    pub port: u16,
    /// Authentication username, also the default sender address.
    pub username: String,
    /// Authentication password.
    pub password: String,
    /// Sender address when it differs from the username.
    pub from_address: Option<String>,
}

/// Failures constructing the SMTP notifier from settings.
#[derive(Debug, thiserror::Error)]
pub enum SmtpConfigError {
    /// The relay hostname was rejected by the transport builder.
    #[error("invalid SMTP relay {server}: {message}")]
    InvalidRelay { server: String, message: String },

    /// The sender address does not parse as a mailbox.
    #[error("invalid sender address {address}: {message}")]
    InvalidSender { address: String, message: String },
}

/// `Notifier` implementation transmitting through an SMTP relay.
///
/// Delivery happens inline with the registration request; there is no queue
/// or retry, so a relay failure surfaces to the workflow immediately.
#[derive(Clone, Debug)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier from relay settings.
    ///
    /// # Errors
    /// Returns [`SmtpConfigError`] when the relay hostname or sender address
    /// is malformed. Connectivity is not probed here; the first send reports
    /// an unreachable relay.
    pub fn new(settings: SmtpSettings) -> Result<Self, SmtpConfigError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.server)
            .map_err(|err| SmtpConfigError::InvalidRelay {
                server: settings.server.clone(),
                message: err.to_string(),
            })?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        let sender = settings
            .from_address
            .as_deref()
            .unwrap_or(&settings.username);
        let from = sender
            .parse::<Mailbox>()
            .map_err(|err| SmtpConfigError::InvalidSender {
                address: sender.to_owned(),
                message: err.to_string(),
            })?;

        Ok(Self { transport, from })
    }
}

/// Fixed plain-text body addressed to the guest by name.
fn message_body(guest_name: &GuestName) -> String {
    format!(
        "Dear {guest_name},\n\nThank you for registering for the wedding. \
         Please find your QR code attached. Show this at the entrance to \
         check in.\n\nBest regards,\nWedding Team"
    )
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_qr_email(
        &self,
        to: &GuestEmail,
        guest_name: &GuestName,
        png: &[u8],
    ) -> Result<(), NotifierError> {
        let recipient = to
            .as_str()
            .parse::<Mailbox>()
            .map_err(|err| NotifierError::failed(err.to_string()))?;

        let attachment = Attachment::new(ATTACHMENT_NAME.to_owned()).body(
            png.to_vec(),
            ContentType::parse("image/png").map_err(|err| NotifierError::failed(err.to_string()))?,
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(SUBJECT)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(message_body(guest_name)))
                    .singlepart(attachment),
            )
            .map_err(|err| NotifierError::failed(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| NotifierError::failed(err.to_string()))?;
        Ok(())
    }
}
