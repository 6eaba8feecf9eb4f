//! Driven port for guest record persistence.
//!
//! The store owns the uniqueness guarantees: the duplicate-email pre-check in
//! the registration workflow is an optimisation, and the unique constraint
//! surfaced through [`GuestStoreError::DuplicateEmail`] at insert time is the
//! authoritative guard.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::define_port_error;
use crate::domain::{Guest, GuestEmail, GuestId, NewGuest};

define_port_error! {
    /// Failures surfaced by guest store adapters.
    pub enum GuestStoreError {
        /// The email column's uniqueness constraint rejected an insert.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// No guest record carries the given id.
        NotFound { id: String } => "no guest with id {id}",
        /// The backing datastore could not be reached.
        Connection { message: String } => "guest store connection error: {message}",
        /// The operation failed inside the datastore.
        Query { message: String } => "guest store query error: {message}",
    }
}

/// Driven port for the persistent guest table.
///
/// Every operation is a single synchronous transaction against the backing
/// store; there is no caching layer in front of it.
#[async_trait]
pub trait GuestStore: Send + Sync {
    /// Look up a guest by email; used as the duplicate-registration pre-check.
    async fn find_by_email(&self, email: &GuestEmail) -> Result<Option<Guest>, GuestStoreError>;

    /// Insert a new guest with `checked_in = false`.
    ///
    /// Fails with [`GuestStoreError::DuplicateEmail`] when a concurrent
    /// insert wins the race past the pre-check.
    async fn insert(&self, guest: NewGuest) -> Result<Guest, GuestStoreError>;

    /// Look up a guest by id.
    async fn find_by_id(&self, id: &GuestId) -> Result<Option<Guest>, GuestStoreError>;

    /// Set `checked_in = true`; a no-op when already true.
    ///
    /// Fails with [`GuestStoreError::NotFound`] when no such guest exists.
    async fn mark_checked_in(&self, id: &GuestId) -> Result<(), GuestStoreError>;

    /// Compensating removal, used only when post-insert notification fails.
    async fn delete(&self, id: &GuestId) -> Result<(), GuestStoreError>;

    /// Return all guest records in insertion order.
    async fn list_all(&self) -> Result<Vec<Guest>, GuestStoreError>;
}

/// In-memory guest store used when no database is configured and as the
/// default substrate for handler tests.
///
/// Mirrors the relational adapter's semantics, including the email
/// uniqueness constraint and insertion-ordered listing.
#[derive(Debug, Default)]
pub struct FixtureGuestStore {
    guests: Mutex<Vec<Guest>>,
}

impl FixtureGuestStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn guests(&self) -> MutexGuard<'_, Vec<Guest>> {
        // Test-only substrate; a poisoned lock still holds consistent data.
        self.guests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl GuestStore for FixtureGuestStore {
    async fn find_by_email(&self, email: &GuestEmail) -> Result<Option<Guest>, GuestStoreError> {
        Ok(self.guests().iter().find(|g| g.email() == email).cloned())
    }

    async fn insert(&self, guest: NewGuest) -> Result<Guest, GuestStoreError> {
        let mut guests = self.guests();
        if guests.iter().any(|g| g.email() == guest.email()) {
            return Err(GuestStoreError::duplicate_email(guest.email().as_str()));
        }
        let stored = Guest::from_parts(
            guest.id(),
            guest.name().clone(),
            guest.email().clone(),
            false,
            Some(Utc::now()),
        );
        guests.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &GuestId) -> Result<Option<Guest>, GuestStoreError> {
        Ok(self.guests().iter().find(|g| g.id() == *id).cloned())
    }

    async fn mark_checked_in(&self, id: &GuestId) -> Result<(), GuestStoreError> {
        let mut guests = self.guests();
        match guests.iter_mut().find(|g| g.id() == *id) {
            Some(guest) => {
                guest.mark_checked_in();
                Ok(())
            }
            None => Err(GuestStoreError::not_found(id.to_string())),
        }
    }

    async fn delete(&self, id: &GuestId) -> Result<(), GuestStoreError> {
        self.guests().retain(|g| g.id() != *id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Guest>, GuestStoreError> {
        Ok(self.guests().clone())
    }
}
