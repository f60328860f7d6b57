//! bcrypt carries its own salt format: 16 bytes in an unpadded base64 variant with the
//! alphabet `./A-Za-z0-9`, which is not accepted by the default salt validation.

use std::ops::RangeInclusive;

use ::bcrypt::{Version, hash_with_salt};
use base64::{
    Engine,
    alphabet,
    engine::{GeneralPurpose, general_purpose::NO_PAD},
};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::{InvalidInputError, Result},
    types::{Factor, Password, PasswordHash, Salt},
};

use super::HashingStrategy;

pub const SALT_LENGTH_IN_BYTES: usize = 16;
/// Length of the encoded digest that follows the salt in a modular crypt string.
pub const DIGEST_LENGTH: usize = 31;
/// The algorithm keys on at most this many password bytes.
pub const MAX_PASSWORD_LENGTH_IN_BYTES: usize = 72;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

const BCRYPT_BASE64: GeneralPurpose = GeneralPurpose::new(&alphabet::BCRYPT, NO_PAD);

/// bcrypt with the cost exponent as the factor.
///
/// Passwords longer than [`MAX_PASSWORD_LENGTH_IN_BYTES`] or containing a NUL byte are
/// rejected instead of truncated.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BcryptParams {}

fn decode_salt(salt: &str) -> Option<[u8; SALT_LENGTH_IN_BYTES]> {
    BCRYPT_BASE64
        .decode(salt)
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
}

fn check_password(password: &Password) -> std::result::Result<(), InvalidInputError> {
    if password.len() > MAX_PASSWORD_LENGTH_IN_BYTES {
        return Err(InvalidInputError::PasswordTooLong {
            length: password.len(),
            max: MAX_PASSWORD_LENGTH_IN_BYTES,
        });
    }

    if password.as_bytes().contains(&0) {
        return Err(InvalidInputError::PasswordContainsNul);
    }

    Ok(())
}

impl HashingStrategy for BcryptParams {
    fn default_factor(&self) -> Factor {
        Factor(::bcrypt::DEFAULT_COST)
    }

    fn factor_range(&self) -> RangeInclusive<Factor> {
        Factor(MIN_COST)..=Factor(MAX_COST)
    }

    fn display_name(&self) -> Option<&str> {
        Some("bcrypt")
    }

    fn generate_salt(&self) -> Salt {
        let mut bytes = [0_u8; SALT_LENGTH_IN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Salt::from(BCRYPT_BASE64.encode(bytes))
    }

    fn validate_salt(&self, salt: &str) -> bool {
        let valid = decode_salt(salt).is_some();

        if !valid {
            tracing::debug!("rejected bcrypt salt");
        }

        valid
    }

    #[instrument(skip_all, fields(factor = *factor))]
    fn hash(&self, password: &Password, salt: &Salt, factor: Factor) -> Result<PasswordHash> {
        self.check_input(salt, factor)?;

        let salt = decode_salt(salt).ok_or(InvalidInputError::InvalidSalt)?;
        check_password(password)?;

        let mut formatted =
            hash_with_salt(password.as_bytes(), *factor, salt)?.format_for_version(Version::TwoB);
        let digest = formatted.split_off(formatted.len() - DIGEST_LENGTH);

        Ok(PasswordHash::from(digest))
    }
}
