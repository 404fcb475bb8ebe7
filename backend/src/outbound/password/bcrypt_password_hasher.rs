//! Bcrypt implementation of the `PasswordHasher` port.
//!
//! Hashing runs on Tokio's blocking pool via [`TraceId::spawn_blocking`],
//! keeping the request's trace id attached to anything logged from the
//! worker thread.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::TraceId;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, PlaintextPassword};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Hashes passwords with bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher using `cost` rounds (4 to 31).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &PlaintextPassword) -> Result<PasswordHash, PasswordHasherError> {
        let secret = password.clone();
        let cost = self.cost;

        let encoded = TraceId::spawn_blocking(move || {
            debug!(cost, "hashing password");
            bcrypt::hash(secret.expose(), cost)
        })
        .await
        .map_err(|err| PasswordHasherError::hashing(format!("hashing task failed: {err}")))?
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;

        Ok(PasswordHash::new(encoded))
    }
}
