pub mod admin;

pub use admin::{AdminRepository, InMemoryAdminRepository};
