//! Pluggable password hashing.
//!
//! [`HashingStrategy`] is the contract between a host authentication system and
//! interchangeable hashing algorithms: given a password, a salt and a work factor it
//! produces a reproducible encoded hash. Strategies also generate and validate salts in
//! their own format. Argon2, PBKDF2 and bcrypt strategies are provided in [`strategy`].

#[macro_use]
pub mod utils;

pub mod credential;
pub mod error;
pub mod salt;
pub mod strategy;
pub mod types;

#[cfg(feature = "cmd")]
pub mod cmd;

pub use credential::Credential;
pub use error::{Error, InvalidInputError, Result};
pub use strategy::{HashingAlgorithm, HashingStrategy};
pub use types::{Factor, Password, PasswordHash, Salt};
