/// Declares a serde-transparent wrapper around a single value.
///
/// Extra derives (`Copy`, `Debug`, `Arbitrary`, ...) may be passed as attributes.
#[macro_export]
macro_rules! newtype {
    {
        $(#[$attr:meta])*
        $vis:vis $ty_name:ident($vis_inner:vis $ty_inner:ty)$(;)?
    } => {
        $(#[$attr])*
        #[derive(
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            ::core::hash::Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::derive_more::Deref,
            ::derive_more::Display,
            ::derive_more::From,
            ::derive_more::Into
        )]
        #[serde(transparent)]
        $vis struct $ty_name($vis_inner $ty_inner);
    };
}
