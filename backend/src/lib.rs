//! Event registration backend library modules.
//!
//! Guests register with a name and email address, receive a QR-coded
//! identifier by email, and are checked in at the venue by scanning it.

pub mod api;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
