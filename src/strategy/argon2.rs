use std::ops::RangeInclusive;

use ::argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine;
use proptest::{
    arbitrary::{Arbitrary, any},
    prop_compose,
    strategy::{BoxedStrategy, Just, Strategy},
};
use proptest_derive::Arbitrary;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::{InvalidInputError, Result},
    salt::{BASE64_SALT, decode_base64_salt},
    types::{Factor, Password, PasswordHash, Salt},
    utils::secret::Secret,
};

use super::HashingStrategy;

pub const BYTES_PEPPER_RECOMMENDED: usize = 32;
/// Shorter salts are rejected by the algorithm.
pub const MIN_SALT_LENGTH_IN_BYTES: usize = 8;
const DEFAULT_T_COST: u32 = 3;

#[derive(Arbitrary, Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Argon2d,
    Argon2i,
    #[default]
    Argon2id,
}

impl Variant {
    fn algorithm(self) -> Algorithm {
        match self {
            Variant::Argon2d => Algorithm::Argon2d,
            Variant::Argon2i => Algorithm::Argon2i,
            Variant::Argon2id => Algorithm::Argon2id,
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Variant::Argon2d => "Argon2d",
            Variant::Argon2i => "Argon2i",
            Variant::Argon2id => "Argon2id",
        }
    }
}

/// Argon2 with the iteration count (`t_cost`) as the factor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Argon2Params {
    /// The specific Argon2 algorithm to be used.
    pub variant: Variant,
    /// Memory size in 1 KiB blocks. Between 8\*`p_cost` and (2^32)-1.
    pub m_cost: u32,
    /// Degree of parallelism. Between 1 and (2^24)-1.
    pub p_cost: u32,
    /// Length of the hash before encoding. At least 4.
    pub output_length_in_bytes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pepper: Option<Secret<Vec<u8>>>,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            variant: Variant::Argon2id,
            m_cost: 19 * 1024, // 19 MiB
            p_cost: 1,
            output_length_in_bytes: 32,
            pepper: None,
        }
    }
}

impl Argon2Params {
    pub fn default_with_pepper(pepper: impl Into<Vec<u8>>) -> Self {
        Self {
            pepper: Some(Secret(pepper.into())),
            ..Default::default()
        }
    }

    pub fn default_with_random_pepper<const PEPPER_BYTES: usize>(
        mut rng: impl CryptoRng + RngCore,
    ) -> Self {
        let mut pepper = vec![0; PEPPER_BYTES];
        rng.fill_bytes(&mut pepper);
        Self::default_with_pepper(pepper)
    }

    pub fn default_with_random_pepper_of_recommended_length(rng: impl CryptoRng + RngCore) -> Self {
        Self::default_with_random_pepper::<BYTES_PEPPER_RECOMMENDED>(rng)
    }

    fn argon2(&self, t_cost: u32) -> Result<Argon2<'_>> {
        let params = Params::new(
            self.m_cost,
            t_cost,
            self.p_cost,
            Some(self.output_length_in_bytes),
        )?;
        let argon2 = match &self.pepper {
            Some(pepper) => Argon2::new_with_secret(
                pepper,
                self.variant.algorithm(),
                Version::V0x13,
                params,
            )?,
            None => Argon2::new(self.variant.algorithm(), Version::V0x13, params),
        };

        Ok(argon2)
    }
}

impl HashingStrategy for Argon2Params {
    fn default_factor(&self) -> Factor {
        Factor(DEFAULT_T_COST)
    }

    fn factor_range(&self) -> RangeInclusive<Factor> {
        Factor(Params::MIN_T_COST)..=Factor(Params::MAX_T_COST)
    }

    fn display_name(&self) -> Option<&str> {
        Some(self.variant.display_name())
    }

    #[instrument(skip_all, fields(variant = self.variant.display_name(), factor = *factor))]
    fn hash(&self, password: &Password, salt: &Salt, factor: Factor) -> Result<PasswordHash> {
        self.check_input(salt, factor)?;

        let salt = decode_base64_salt(salt)?;

        if salt.len() < MIN_SALT_LENGTH_IN_BYTES {
            return Err(InvalidInputError::SaltTooShort {
                length: salt.len(),
                min: MIN_SALT_LENGTH_IN_BYTES,
            }
            .into());
        }

        let mut output = vec![0_u8; self.output_length_in_bytes];

        self.argon2(*factor)?
            .hash_password_into(password.as_bytes(), &salt, &mut output)?;

        Ok(PasswordHash::from(BASE64_SALT.encode(output)))
    }
}

prop_compose! {
    fn arb_argon2_params(log_max_cost: u32)(
        p_cost in 1_u32..4,
    )(
        variant in any::<Variant>(),
        m_cost in (8 * p_cost)..(std::cmp::max(8 * p_cost + 1, 1 << log_max_cost)),
        p_cost in Just(p_cost),
        output_length_in_bytes in 16_usize..=64,
        pepper in proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64)),
    ) -> Argon2Params {
        Argon2Params {
            variant,
            m_cost,
            p_cost,
            output_length_in_bytes,
            pepper: pepper.map(Secret),
        }
    }
}

impl Arbitrary for Argon2Params {
    type Parameters = ();
    type Strategy = BoxedStrategy<Argon2Params>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        arb_argon2_params(6).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> Argon2Params {
        Argon2Params {
            m_cost: 64,
            ..Default::default()
        }
    }

    #[test]
    fn rejects_salt_shorter_than_eight_bytes() {
        let params = fast_params();
        let result = params.hash(
            &Password::from("password"),
            &Salt::from("c2FsdA=="),
            Factor(1),
        );

        assert!(matches!(
            result,
            Err(crate::Error::InvalidInput(InvalidInputError::SaltTooShort { length: 4, min: 8 }))
        ));
    }

    #[test]
    fn rejects_zero_iterations() {
        let params = fast_params();
        let salt = params.generate_salt();
        let result = params.hash(&Password::from("password"), &salt, Factor(0));

        assert!(matches!(
            result,
            Err(crate::Error::InvalidInput(InvalidInputError::FactorOutOfRange { .. }))
        ));
    }

    #[test]
    fn output_has_configured_length() {
        let params = Argon2Params {
            output_length_in_bytes: 48,
            ..fast_params()
        };
        let salt = params.generate_salt();
        let hash = params.hash(&Password::from(""), &salt, Factor(1)).unwrap();

        assert_eq!(BASE64_SALT.decode(hash.as_str()).unwrap().len(), 48);
    }

    #[test]
    fn pepper_changes_the_hash() {
        let plain = fast_params();
        let peppered = Argon2Params {
            pepper: Some(Secret(b"pepper".to_vec())),
            ..fast_params()
        };
        let password = Password::from("password");
        let salt = plain.generate_salt();

        assert_ne!(
            plain.hash(&password, &salt, Factor(1)).unwrap(),
            peppered.hash(&password, &salt, Factor(1)).unwrap(),
        );
    }

    #[test]
    fn variants_have_distinct_names() {
        let names = [Variant::Argon2d, Variant::Argon2i, Variant::Argon2id]
            .map(|variant| Argon2Params { variant, ..Default::default() })
            .map(|params| params.display_name().map(str::to_owned));

        assert_eq!(
            names,
            [
                Some("Argon2d".to_owned()),
                Some("Argon2i".to_owned()),
                Some("Argon2id".to_owned())
            ]
        );
    }
}
