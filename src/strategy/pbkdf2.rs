use std::ops::RangeInclusive;

use ::pbkdf2::pbkdf2_hmac;
use base64::Engine;
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha512};
use tracing::instrument;

use crate::{
    error::Result,
    salt::{BASE64_SALT, decode_base64_salt},
    types::{Factor, Password, PasswordHash, Salt},
};

use super::HashingStrategy;

#[derive(Arbitrary, Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Pbkdf2Prf {
    #[default]
    Sha256,
    Sha512,
}

impl Pbkdf2Prf {
    /// Iteration counts recommended by OWASP for each PRF.
    fn recommended_iterations(self) -> u32 {
        match self {
            Pbkdf2Prf::Sha256 => 600_000,
            Pbkdf2Prf::Sha512 => 210_000,
        }
    }
}

/// PBKDF2 with the iteration count as the factor.
#[derive(Arbitrary, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// Underlying pseudo-random function.
    pub prf: Pbkdf2Prf,
    #[proptest(strategy = "16_usize..=64")]
    pub output_length_in_bytes: usize,
}

impl Default for Pbkdf2Params {
    fn default() -> Self {
        Self {
            prf: Pbkdf2Prf::default(),
            output_length_in_bytes: 32,
        }
    }
}

impl HashingStrategy for Pbkdf2Params {
    fn default_factor(&self) -> Factor {
        Factor(self.prf.recommended_iterations())
    }

    fn factor_range(&self) -> RangeInclusive<Factor> {
        Factor(1)..=Factor(u32::MAX)
    }

    fn display_name(&self) -> Option<&str> {
        Some(match self.prf {
            Pbkdf2Prf::Sha256 => "PBKDF2-HMAC-SHA256",
            Pbkdf2Prf::Sha512 => "PBKDF2-HMAC-SHA512",
        })
    }

    #[instrument(skip_all, fields(prf = ?self.prf, factor = *factor))]
    fn hash(&self, password: &Password, salt: &Salt, factor: Factor) -> Result<PasswordHash> {
        self.check_input(salt, factor)?;

        let salt = decode_base64_salt(salt)?;
        let mut output = vec![0_u8; self.output_length_in_bytes];

        match self.prf {
            Pbkdf2Prf::Sha256 => {
                pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, *factor, &mut output)
            }
            Pbkdf2Prf::Sha512 => {
                pbkdf2_hmac::<Sha512>(password.as_bytes(), &salt, *factor, &mut output)
            }
        }

        Ok(PasswordHash::from(BASE64_SALT.encode(output)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test vectors for PBKDF2-HMAC-SHA256/512 with password "password" and salt "salt".
    #[test]
    fn matches_known_vectors() {
        let password = Password::from("password");
        let salt = Salt::from("c2FsdA==");
        let sha256 = Pbkdf2Params::default();
        let sha512 = Pbkdf2Params {
            prf: Pbkdf2Prf::Sha512,
            output_length_in_bytes: 64,
        };

        assert_eq!(
            sha256.hash(&password, &salt, Factor(1)).unwrap().as_str(),
            "Eg+2z/z4syxD5yJSVsT4N6hlSMkszDVICAWYfLcL4Xs="
        );
        assert_eq!(
            sha256.hash(&password, &salt, Factor(2)).unwrap().as_str(),
            "rk0Mla9rRtMtCt/5KPBt0CowP47zwlHf1uLYWpVHTEM="
        );
        assert_eq!(
            sha256.hash(&password, &salt, Factor(4096)).unwrap().as_str(),
            "xeR41ZKIyEGqUw22hFxMjZYok6ABzk4RpJY4c6qYE0o="
        );
        assert_eq!(
            sha512.hash(&password, &salt, Factor(1)).unwrap().as_str(),
            "hn9wzxreAs/zdSWZo6U9xK80x6ZpgVrl1RNVThyM8lLALUcKKFoFAbrZmb/pQ8CPBQI119aLHaVeY/c7YKV/zg=="
        );
    }

    #[test]
    fn unpadded_salt_hashes_like_padded_salt() {
        let params = Pbkdf2Params::default();
        let password = Password::from("password");

        assert_eq!(
            params.hash(&password, &Salt::from("c2FsdA"), Factor(1)).unwrap(),
            params.hash(&password, &Salt::from("c2FsdA=="), Factor(1)).unwrap(),
        );
    }

    #[test]
    fn default_factor_depends_on_prf() {
        let sha512 = Pbkdf2Params {
            prf: Pbkdf2Prf::Sha512,
            ..Default::default()
        };

        assert_eq!(Pbkdf2Params::default().default_factor(), Factor(600_000));
        assert_eq!(sha512.default_factor(), Factor(210_000));
    }
}
