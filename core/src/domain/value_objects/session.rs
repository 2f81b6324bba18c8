//! Signed session credential handed to an administrator after login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bearer token plus the facts it encodes.
///
/// The server keeps no copy; any holder of the signing secret can verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    /// Encoded JWT
    pub token: String,

    /// Administrator the token was issued to
    pub admin_id: Uuid,

    /// Expiry of the token
    pub expires_at: DateTime<Utc>,
}
