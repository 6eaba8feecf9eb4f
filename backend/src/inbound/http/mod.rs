//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod guests;
pub mod state;
pub mod validation;

pub use error::ApiResult;
