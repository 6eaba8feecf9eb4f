//! Outbound adapters implementing the domain's driven ports.

pub mod email;
pub mod persistence;
pub mod qr;
