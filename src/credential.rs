use std::sync::Arc;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::{
    error::Result,
    strategy::{HashingStrategy, spawn_hash},
    types::{Factor, Password, PasswordHash, Salt},
};

/// The triple a host persists for each password, produced by one strategy.
///
/// The strategy itself is not recorded; the host must use the same one for verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub salt: Salt,
    pub factor: Factor,
    pub hash: PasswordHash,
}

impl Credential {
    /// Hashes `password` with a freshly generated salt. Without an explicit `factor`, the
    /// strategy's default is used.
    pub fn create<S>(strategy: &S, password: &Password, factor: Option<Factor>) -> Result<Self>
    where
        S: HashingStrategy + ?Sized,
    {
        let factor = factor.unwrap_or_else(|| strategy.default_factor());
        let salt = strategy.generate_salt();
        let hash = strategy.hash(password, &salt, factor)?;

        Ok(Self { salt, factor, hash })
    }

    /// Recomputes the hash of `password` with the stored salt and factor, and compares it
    /// to the stored hash in constant time.
    pub fn verify<S>(&self, strategy: &S, password: &Password) -> Result<bool>
    where
        S: HashingStrategy + ?Sized,
    {
        let hash = strategy.hash(password, &self.salt, self.factor)?;

        Ok(self.matches(&hash))
    }

    pub fn matches(&self, hash: &PasswordHash) -> bool {
        self.hash.as_bytes().ct_eq(hash.as_bytes()).into()
    }

    pub async fn create_async<S>(
        strategy: Arc<S>,
        password: Password,
        factor: Option<Factor>,
    ) -> Result<Self>
    where
        S: HashingStrategy + ?Sized + 'static,
    {
        let factor = factor.unwrap_or_else(|| strategy.default_factor());
        let salt = strategy.generate_salt();
        let hash = spawn_hash(strategy, password, salt.clone(), factor).await?;

        Ok(Self { salt, factor, hash })
    }

    pub async fn verify_async<S>(&self, strategy: Arc<S>, password: Password) -> Result<bool>
    where
        S: HashingStrategy + ?Sized + 'static,
    {
        let hash = spawn_hash(strategy, password, self.salt.clone(), self.factor).await?;

        Ok(self.matches(&hash))
    }
}
