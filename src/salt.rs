//! Default salt handling shared by strategies that exchange salts as standard base64.
//!
//! Strategies with their own salt format (see [`crate::strategy::bcrypt`]) override
//! [`HashingStrategy::generate_salt`](crate::strategy::HashingStrategy::generate_salt) and
//! [`HashingStrategy::validate_salt`](crate::strategy::HashingStrategy::validate_salt)
//! instead of using these functions.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use rand::{CryptoRng, RngCore, rngs::OsRng};

use crate::{error::InvalidInputError, types::Salt};

/// Length of a generated salt before encoding.
pub const SALT_LENGTH_IN_BYTES: usize = 32;

const IDENTIFIER_LENGTH_IN_BYTES: usize = 16;

/// Standard alphabet. Encodes with padding; decodes with or without it, but rejects
/// malformed padding and non-zero trailing bits.
pub const BASE64_SALT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Generates a salt from the operating system's CSPRNG.
///
/// Panics if the operating system cannot provide randomness.
pub fn generate_base64_salt() -> Salt {
    generate_base64_salt_with(OsRng)
}

/// Concatenates two independently drawn 128-bit identifiers and base64-encodes the
/// resulting 32 bytes.
pub fn generate_base64_salt_with(mut rng: impl CryptoRng + RngCore) -> Salt {
    let mut bytes = [0_u8; SALT_LENGTH_IN_BYTES];
    let (first, second) = bytes.split_at_mut(IDENTIFIER_LENGTH_IN_BYTES);

    first.copy_from_slice(&random_identifier(&mut rng).to_be_bytes());
    second.copy_from_slice(&random_identifier(&mut rng).to_be_bytes());

    Salt::from(BASE64_SALT.encode(bytes))
}

fn random_identifier(rng: &mut (impl CryptoRng + RngCore)) -> u128 {
    let mut bytes = [0_u8; IDENTIFIER_LENGTH_IN_BYTES];
    rng.fill_bytes(&mut bytes);
    u128::from_be_bytes(bytes)
}

/// Structural check only: the decoded length is not inspected.
pub fn is_base64_salt(salt: &str) -> bool {
    match BASE64_SALT.decode(salt) {
        Ok(_) => true,
        Err(error) => {
            tracing::debug!(%error, "rejected base64 salt");
            false
        }
    }
}

pub fn decode_base64_salt(salt: &str) -> Result<Vec<u8>, InvalidInputError> {
    BASE64_SALT
        .decode(salt)
        .map_err(|_| InvalidInputError::InvalidSalt)
}
