//! Credential verification interface.

use super::{error::AuthError, value_object::UserId};

/// Verifies a bearer credential and extracts the identity it was issued for.
///
/// Called once per connection, before the socket is admitted, and once per
/// authenticated HTTP request.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}
