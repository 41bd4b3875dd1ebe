//! Witgen ABI
//!
//! Typed description of a circuit's input contract: an ordered list of named
//! parameters, each with a recursive [`TypeDescriptor`].

pub mod abi;
pub mod error;
pub mod types;

pub use abi::{AbiDescription, Parameter};
pub use error::AbiError;
pub use types::{FIELD_BITS, Sign, TypeDescriptor, hex_digits};
