//! Domain primitives, ports, and workflow services.
//!
//! Purpose: define the strongly typed guest entity, the port traits crossed
//! by inbound and outbound adapters, and the registration/check-in workflow
//! services that orchestrate them. Types here are transport agnostic;
//! serialisation contracts live in the inbound adapter DTOs.

pub mod auth;
pub mod error;
pub mod guest;
pub mod ports;
pub mod registration;
pub mod trace_id;

pub use self::auth::AdminSecret;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::guest::{
    Guest, GuestEmail, GuestEmailValidationError, GuestId, GuestIdValidationError, GuestName,
    GuestNameValidationError, NewGuest,
};
pub use self::registration::{RegistrationConfirmation, RegistrationService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
