//! Operational REST endpoints shared across deployments.

pub mod health;

pub use health::HealthState;
