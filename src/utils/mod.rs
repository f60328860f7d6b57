#[macro_use]
pub mod newtype;
pub mod secret;
