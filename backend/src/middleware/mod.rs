//! Request middleware

pub mod auth;

pub use auth::{auth_middleware, parse_basic_credentials, CredentialVerifier, StaticCredentials};
