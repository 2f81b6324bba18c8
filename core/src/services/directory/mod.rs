//! Administrator directory: email to administrator resolution
//!
//! Every email entering the directory is canonicalized (trimmed and
//! ASCII-lowercased) before it touches storage, on writes and on lookups.

mod service;


pub use service::AdminDirectory;
