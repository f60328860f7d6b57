use std::fmt::{Debug, Display};

use derive_more::{Deref, DerefMut};
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A wrapper with a custom [`Display`] and [`Debug`] implementation to hide the underlying data.
/// The data is zeroized when the wrapper is dropped.
#[derive(
    Arbitrary,
    Clone,
    Default,
    Deref,
    DerefMut,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    Zeroize,
    ZeroizeOnDrop,
)]
#[serde(transparent)]
pub struct Secret<T: Zeroize>(pub T);

impl<T> Display for Secret<T>
where
    T: Zeroize,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret")
    }
}

impl<T> Debug for Secret<T>
where
    T: Zeroize,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::Secret;

    #[test]
    fn formatting_hides_contents() {
        let secret = Secret(String::from("hunter2"));

        assert_eq!(format!("{secret}"), "Secret");
        assert_eq!(format!("{secret:?}"), "Secret");
        assert_eq!(secret.as_str(), "hunter2");
    }
}
