use thiserror::Error;

use crate::types::Factor;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error("Argon2: {0}")]
    Argon2(#[from] argon2::Error),
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("Tokio Join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The password, salt or factor passed to a strategy cannot be used to compute a hash.
///
/// Retrying with the same inputs fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("Salt is not validly encoded for this strategy")]
    InvalidSalt,
    #[error("Salt decodes to {length} bytes, fewer than the minimum of {min}")]
    SaltTooShort { length: usize, min: usize },
    #[error("Factor {factor} is outside the supported range {min}..={max}")]
    FactorOutOfRange {
        factor: Factor,
        min: Factor,
        max: Factor,
    },
    #[error("Password is {length} bytes long, more than the maximum of {max}")]
    PasswordTooLong { length: usize, max: usize },
    #[error("Password contains a NUL byte")]
    PasswordContainsNul,
}
