//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::{PasswordHash, PlaintextPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// The hashing primitive rejected the input or failed internally.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Driven port turning a plaintext secret into a storable hash.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password`.
    async fn hash(&self, password: &PlaintextPassword) -> Result<PasswordHash, PasswordHasherError>;
}
