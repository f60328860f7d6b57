//! Values exchanged across the [`HashingStrategy`](crate::strategy::HashingStrategy) boundary.
//!
//! The host persists the [`Salt`], [`Factor`] and [`PasswordHash`] of a credential.
//! A [`Password`] only lives for the duration of a single hash computation.

use proptest_derive::Arbitrary;

use crate::utils::secret::Secret;

newtype! {
    /// The work or cost parameter of a strategy, such as an iteration count or a cost
    /// exponent. Each strategy defines its own default and supported range.
    #[derive(Arbitrary, Copy, Debug)]
    pub Factor(pub u32);
}

newtype! {
    /// A salt in its textual form. Most strategies expect standard base64.
    #[derive(Debug)]
    pub Salt(String);
}

newtype! {
    /// The encoded output of a strategy.
    #[derive(Debug)]
    pub PasswordHash(String);
}

impl From<&str> for Salt {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for Salt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PasswordHash {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An untrusted password supplied by a caller.
///
/// Formatting never reveals the contents, and the buffer is zeroized on drop.
/// Intentionally not serializable.
#[derive(Clone, Debug)]
pub struct Password(Secret<String>);

impl Password {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(Secret(value))
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self(Secret(value.to_owned()))
    }
}
