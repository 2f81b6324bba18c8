//! Token service module for administrator session credentials
//!
//! Sessions are stateless HS256 JWTs: nothing is stored server side, and
//! any holder of the signing secret can verify a token.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
