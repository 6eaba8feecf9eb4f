//! Guest entity and its validated field types.
//!
//! A guest registers once with a name and email address, receives a QR-coded
//! identifier, and is checked in at the venue by scanning that identifier.
//! The constructors here enforce the field invariants so an invalid guest can
//! never reach a workflow service or a store adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation failures for [`GuestId`] parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestIdValidationError {
    /// The identifier was absent or blank.
    #[error("guest id must not be empty")]
    Missing,
    /// The identifier is not a canonical UUID string.
    #[error("guest id must be a valid UUID")]
    Invalid,
}

/// Opaque unique guest identifier.
///
/// A UUID v4 retained in its canonical 36-character string form. The id is
/// both the primary key of the guest record and the payload encoded into the
/// QR image, so it must survive serde round-trips unchanged.
///
/// # Examples
/// ```
/// use registration_backend::domain::GuestId;
///
/// let id = GuestId::generate();
/// let parsed = GuestId::parse(&id.to_string()).expect("canonical form round-trips");
/// assert_eq!(parsed, id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GuestId(Uuid);

impl GuestId {
    /// Generate a fresh random identifier.
    ///
    /// UUID v4 gives a collision-resistant token without central
    /// coordination, so concurrent registrations never contend on id
    /// allocation.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    ///
    /// # Errors
    /// Returns [`GuestIdValidationError::Missing`] for blank input and
    /// [`GuestIdValidationError::Invalid`] for malformed UUIDs.
    pub fn parse(value: &str) -> Result<Self, GuestIdValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(GuestIdValidationError::Missing);
        }
        Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| GuestIdValidationError::Invalid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<GuestId> for String {
    fn from(value: GuestId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for GuestId {
    type Error = GuestIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Validation failures for [`GuestName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestNameValidationError {
    /// The name was absent or blank after trimming.
    #[error("guest name must not be empty")]
    Empty,
}

/// Display name supplied at registration; non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestName(String);

impl GuestName {
    /// Validate and construct a guest name.
    ///
    /// # Errors
    /// Returns [`GuestNameValidationError::Empty`] when the trimmed input is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, GuestNameValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(GuestNameValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuestName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for [`GuestEmail`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestEmailValidationError {
    /// The address was absent or blank after trimming.
    #[error("guest email must not be empty")]
    Empty,
    /// The address lacks an `@` separating non-empty local and domain parts.
    #[error("guest email must be a valid address")]
    Malformed,
}

/// Email address used as the notification destination and the natural
/// external key for a guest.
///
/// Validation is a minimal structural check (`local@domain` with both parts
/// non-empty), not full RFC conformance; the mail relay is the authority on
/// deliverability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestEmail(String);

impl GuestEmail {
    /// Validate and construct a guest email address.
    ///
    /// # Errors
    /// Returns [`GuestEmailValidationError::Empty`] for blank input and
    /// [`GuestEmailValidationError::Malformed`] when the `local@domain`
    /// shape is missing.
    pub fn new(value: impl Into<String>) -> Result<Self, GuestEmailValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(GuestEmailValidationError::Empty);
        }
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(GuestEmailValidationError::Malformed),
        }
    }

    /// Borrow the validated address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuestEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Insertion view of a guest: the fields the caller supplies plus the
/// server-generated id. `checked_in` is implicitly false and the creation
/// timestamp is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    id: GuestId,
    name: GuestName,
    email: GuestEmail,
}

impl NewGuest {
    /// Bundle the parts of a pending guest record.
    #[must_use]
    pub fn new(id: GuestId, name: GuestName, email: GuestEmail) -> Self {
        Self { id, name, email }
    }

    /// Server-generated identifier.
    #[must_use]
    pub fn id(&self) -> GuestId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &GuestName {
        &self.name
    }

    /// Notification address and natural external key.
    #[must_use]
    pub fn email(&self) -> &GuestEmail {
        &self.email
    }

    /// Payload embedded in the QR image.
    ///
    /// Always equal to the id's canonical string; the column is retained for
    /// schema parity but derived here so the two can never diverge.
    #[must_use]
    pub fn qr_code_data(&self) -> String {
        self.id.to_string()
    }
}

/// A registered guest record.
///
/// ## Invariants
/// - `id` is unique and immutable once assigned.
/// - `email` is unique across all guests (enforced by the store).
/// - `checked_in` only transitions false to true, never back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    id: GuestId,
    name: GuestName,
    email: GuestEmail,
    checked_in: bool,
    registered_at: Option<DateTime<Utc>>,
}

impl Guest {
    /// Reassemble a guest from stored parts.
    #[must_use]
    pub fn from_parts(
        id: GuestId,
        name: GuestName,
        email: GuestEmail,
        checked_in: bool,
        registered_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            checked_in,
            registered_at,
        }
    }

    /// Unique identifier and QR payload.
    #[must_use]
    pub fn id(&self) -> GuestId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &GuestName {
        &self.name
    }

    /// Notification address.
    #[must_use]
    pub fn email(&self) -> &GuestEmail {
        &self.email
    }

    /// Whether the guest has arrived at the venue.
    #[must_use]
    pub fn checked_in(&self) -> bool {
        self.checked_in
    }

    /// Creation time assigned by the store; absent until persisted.
    #[must_use]
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        self.registered_at
    }

    /// Payload embedded in the QR image; equal to the id's string form.
    #[must_use]
    pub fn qr_code_data(&self) -> String {
        self.id.to_string()
    }

    /// Apply the one-way check-in transition.
    pub fn mark_checked_in(&mut self) {
        self.checked_in = true;
    }
}

#[cfg(test)]
mod tests;
