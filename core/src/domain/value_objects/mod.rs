//! Value objects returned by domain services.

pub mod session;

pub use session::SessionCredential;
