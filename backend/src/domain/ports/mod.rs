//! Domain ports for the hexagonal boundary.
//!
//! Each port is an object-safe trait held as `Arc<dyn Port>` by the workflow
//! services. Fixture implementations back the process when the corresponding
//! external system is not configured and serve as the default substrate for
//! tests.

mod macros;
pub(crate) use macros::define_port_error;

mod guest_store;
mod notifier;
mod qr_renderer;

pub use guest_store::{FixtureGuestStore, GuestStore, GuestStoreError};
pub use notifier::{DisabledNotifier, FixtureNotifier, Notifier, NotifierError, SentEmail};
pub use qr_renderer::{QrRenderError, QrRenderer};
