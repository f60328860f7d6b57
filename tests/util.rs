use std::ops::RangeInclusive;

use base64::{Engine, engine::general_purpose::STANDARD};
use hashplug::{
    Error, Factor, HashingAlgorithm, HashingStrategy, InvalidInputError, Password, PasswordHash,
    Result, Salt,
    salt::decode_base64_salt,
    strategy::{argon2::Argon2Params, bcrypt::BcryptParams, pbkdf2::Pbkdf2Params},
};
use proptest::{prop_compose, strategy::Strategy};
use sha2::{Digest, Sha256};

/// A cheap strategy relying on every provided method of [`HashingStrategy`].
#[derive(Debug, Default)]
pub struct Sha256Chain;

impl HashingStrategy for Sha256Chain {
    fn default_factor(&self) -> Factor {
        Factor(16)
    }

    fn factor_range(&self) -> RangeInclusive<Factor> {
        Factor(1)..=Factor(1024)
    }

    fn hash(&self, password: &Password, salt: &Salt, factor: Factor) -> Result<PasswordHash> {
        self.check_input(salt, factor)?;

        let salt = decode_base64_salt(salt)?;
        let mut digest = Sha256::new()
            .chain_update(&salt)
            .chain_update(password.as_bytes())
            .finalize();

        for _ in 1..*factor {
            digest = Sha256::new()
                .chain_update(digest)
                .chain_update(password.as_bytes())
                .finalize();
        }

        Ok(PasswordHash::from(STANDARD.encode(digest)))
    }
}

/// A strategy that keeps every provided method, including `display_name`.
#[derive(Debug, Default)]
pub struct Unnamed;

impl HashingStrategy for Unnamed {
    fn default_factor(&self) -> Factor {
        Factor(0)
    }

    fn hash(&self, password: &Password, salt: &Salt, factor: Factor) -> Result<PasswordHash> {
        self.check_input(salt, factor)?;

        let digest = Sha256::new()
            .chain_update(factor.to_be_bytes())
            .chain_update(decode_base64_salt(salt)?)
            .chain_update(password.as_bytes())
            .finalize();

        Ok(PasswordHash::from(STANDARD.encode(digest)))
    }
}

#[allow(unused)]
pub fn default_algorithms() -> Vec<HashingAlgorithm> {
    vec![
        HashingAlgorithm::Argon2(Argon2Params::default()),
        HashingAlgorithm::Pbkdf2(Pbkdf2Params::default()),
        HashingAlgorithm::Bcrypt(BcryptParams::default()),
    ]
}

/// The cheapest factor the strategy accepts.
#[allow(unused)]
pub fn min_factor(strategy: &(impl HashingStrategy + ?Sized)) -> Factor {
    *strategy.factor_range().start()
}

/// Hashes `password`, or returns `None` if the strategy rejects it as too long.
#[allow(unused)]
pub fn hash_unless_too_long(
    strategy: &(impl HashingStrategy + ?Sized),
    password: &Password,
    salt: &Salt,
    factor: Factor,
) -> Option<PasswordHash> {
    match strategy.hash(password, salt, factor) {
        Ok(hash) => Some(hash),
        Err(Error::InvalidInput(InvalidInputError::PasswordTooLong { .. })) => None,
        Err(error) => panic!("hashing failed: {error}"),
    }
}

prop_compose! {
    /// Printable ASCII, reaching past bcrypt's 72 byte limit.
    #[allow(unused)]
    pub fn arb_password()(password in "[ -~]{0,96}") -> String {
        password
    }
}

prop_compose! {
    #[allow(unused)]
    pub fn arb_salt_bytes()(
        bytes in proptest::collection::vec(proptest::arbitrary::any::<u8>(), 8..64),
    ) -> Vec<u8> {
        bytes
    }
}

#[allow(unused)]
pub fn arb_base64_salt() -> impl Strategy<Value = String> {
    arb_salt_bytes().prop_map(|bytes| STANDARD.encode(bytes))
}
