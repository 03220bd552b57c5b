//! Credential verification implementations.

pub mod jwt;

pub use jwt::{Claims, JwtCredentialVerifier, encode_token};
