//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain workflow service and remain testable without I/O.

use std::sync::Arc;

use crate::domain::{AdminSecret, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, check-in, and admin query workflows.
    pub registration: Arc<RegistrationService>,
    /// Static shared secret for the admin login endpoint.
    pub admin: AdminSecret,
}

impl HttpState {
    /// Bundle the workflow service and admin secret for handler injection.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use registration_backend::domain::ports::{DisabledNotifier, FixtureGuestStore};
    /// use registration_backend::domain::{AdminSecret, RegistrationService};
    /// use registration_backend::inbound::http::state::HttpState;
    /// use registration_backend::outbound::qr::PngQrRenderer;
    ///
    /// let service = RegistrationService::new(
    ///     Arc::new(FixtureGuestStore::new()),
    ///     Arc::new(PngQrRenderer::default()),
    ///     Arc::new(DisabledNotifier),
    /// );
    /// let state = HttpState::new(Arc::new(service), AdminSecret::new("supersecret"));
    /// let _admin = state.admin.clone();
    /// ```
    #[must_use]
    pub fn new(registration: Arc<RegistrationService>, admin: AdminSecret) -> Self {
        Self {
            registration,
            admin,
        }
    }
}
