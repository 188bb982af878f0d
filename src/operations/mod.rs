//! vSphere API operation implementations.
//!
//! Each submodule adds its operations to [`VsphereClient`](crate::VsphereClient)
//! and holds the local checks those operations run before any request.

pub mod certificate;
pub mod session;

// Re-export helper functions that may be useful
pub use certificate::{validate_renew_duration, MAX_RENEW_DURATION_DAYS};
pub use session::basic_auth_value;
