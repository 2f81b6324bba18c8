//! MySQL repository implementations

pub mod admin_repository_impl;

pub use admin_repository_impl::MySqlAdminRepository;
