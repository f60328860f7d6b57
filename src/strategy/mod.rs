//! Password hashing strategies.
//!
//! A [`HashingStrategy`] turns a password, a salt and a work factor into an encoded hash.
//! Hosts pick a strategy per credential and persist the salt, factor and hash it produced,
//! so any strategy can be swapped in behind the same call shape.
//! [`HashingAlgorithm`] bundles the strategies shipped with this crate into one
//! serializable configuration value.

use std::{ops::RangeInclusive, sync::Arc};

use proptest::{
    arbitrary::{Arbitrary, any},
    prop_oneof,
    strategy::{BoxedStrategy, Just, Strategy},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{InvalidInputError, Result},
    salt,
    types::{Factor, Password, PasswordHash, Salt},
};

use self::{argon2::Argon2Params, bcrypt::BcryptParams, pbkdf2::Pbkdf2Params};

pub mod argon2;
pub mod bcrypt;
pub mod pbkdf2;

/// The contract every password hashing algorithm implements.
///
/// All operations must be safe to call concurrently. [`HashingStrategy::hash`] is blocking
/// and may be expensive; see [`spawn_hash`] for running it off an async executor.
pub trait HashingStrategy: Send + Sync {
    /// The recommended factor for new credentials.
    fn default_factor(&self) -> Factor;

    /// Computes the encoded hash of `password`.
    ///
    /// Must be deterministic in `(password, salt, factor)`, and must not log or persist the
    /// password. Fails with [`InvalidInputError`] when the password, salt or factor is
    /// unsuitable.
    fn hash(&self, password: &Password, salt: &Salt, factor: Factor) -> Result<PasswordHash>;

    /// Generates a fresh salt accepted by [`HashingStrategy::validate_salt`].
    ///
    /// By default, 32 random bytes encoded as padded standard base64.
    fn generate_salt(&self) -> Salt {
        salt::generate_base64_salt()
    }

    /// Whether `salt` is acceptable to [`HashingStrategy::hash`].
    ///
    /// By default, any string that decodes as standard base64. Strategies using a different
    /// encoding must override this.
    fn validate_salt(&self, salt: &str) -> bool {
        salt::is_base64_salt(salt)
    }

    /// A human readable label for selection UIs.
    fn display_name(&self) -> Option<&str> {
        None
    }

    /// The factors [`HashingStrategy::hash`] accepts.
    fn factor_range(&self) -> RangeInclusive<Factor> {
        Factor(u32::MIN)..=Factor(u32::MAX)
    }

    /// Checks `salt` and `factor` against [`HashingStrategy::validate_salt`] and
    /// [`HashingStrategy::factor_range`]. Implementations call this before hashing.
    fn check_input(
        &self,
        salt: &str,
        factor: Factor,
    ) -> std::result::Result<(), InvalidInputError> {
        if !self.validate_salt(salt) {
            return Err(InvalidInputError::InvalidSalt);
        }

        let range = self.factor_range();

        if !range.contains(&factor) {
            return Err(InvalidInputError::FactorOutOfRange {
                factor,
                min: *range.start(),
                max: *range.end(),
            });
        }

        let recommended = self.default_factor();

        if factor < recommended {
            tracing::warn!(
                "factor {factor} of strategy {strategy:?} is lower than the recommended value of {recommended}",
                strategy = self.display_name().unwrap_or("<unnamed>"),
            );
        }

        Ok(())
    }
}

/// Runs [`HashingStrategy::hash`] on the blocking thread pool.
///
/// Dropping the returned future does not cancel the computation; it finishes in the
/// background and its result is discarded.
pub async fn spawn_hash<S>(
    strategy: Arc<S>,
    password: Password,
    salt: Salt,
    factor: Factor,
) -> Result<PasswordHash>
where
    S: HashingStrategy + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || strategy.hash(&password, &salt, factor)).await?
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HashingAlgorithm {
    Argon2(Argon2Params),
    Pbkdf2(Pbkdf2Params),
    Bcrypt(BcryptParams),
}

impl Default for HashingAlgorithm {
    fn default() -> Self {
        Self::Argon2(Default::default())
    }
}

impl HashingAlgorithm {
    fn strategy(&self) -> &dyn HashingStrategy {
        match self {
            Self::Argon2(params) => params,
            Self::Pbkdf2(params) => params,
            Self::Bcrypt(params) => params,
        }
    }
}

impl HashingStrategy for HashingAlgorithm {
    fn default_factor(&self) -> Factor {
        self.strategy().default_factor()
    }

    fn hash(&self, password: &Password, salt: &Salt, factor: Factor) -> Result<PasswordHash> {
        self.strategy().hash(password, salt, factor)
    }

    fn generate_salt(&self) -> Salt {
        self.strategy().generate_salt()
    }

    fn validate_salt(&self, salt: &str) -> bool {
        self.strategy().validate_salt(salt)
    }

    fn display_name(&self) -> Option<&str> {
        self.strategy().display_name()
    }

    fn factor_range(&self) -> RangeInclusive<Factor> {
        self.strategy().factor_range()
    }
}

/// Generates algorithms with parameters cheap enough to hash at the minimum factor in tests.
impl Arbitrary for HashingAlgorithm {
    type Parameters = ();
    type Strategy = BoxedStrategy<HashingAlgorithm>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any::<Argon2Params>().prop_map(Self::Argon2),
            any::<Pbkdf2Params>().prop_map(Self::Pbkdf2),
            Just(Self::Bcrypt(BcryptParams::default())),
        ]
        .boxed()
    }
}
