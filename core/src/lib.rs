//! # Witgen Core
//!
//! Builds the initial witness for a Noir circuit from named inputs.
//!
//! A circuit manifest is registered under a key; its ABI then drives the
//! encoding of each named input into fixed-width hex slots, in parameter
//! order.
//!
//! ## Example
//!
//! ```rust
//! use witgen_core::{CircuitRegistry, InputValue, WitnessInputs};
//!
//! let manifest = br#"{
//!     "backend": "acvm-backend-barretenberg",
//!     "bytecode": "AQID",
//!     "abi": {
//!         "parameters": [
//!             {"name": "x", "type": {"kind": "field"}, "visibility": "private"},
//!             {"name": "y", "type": {"kind": "field"}, "visibility": "public"}
//!         ],
//!         "param_witnesses": {"x": [1], "y": [2]}
//!     }
//! }"#;
//!
//! let registry = CircuitRegistry::new();
//! registry.register("basic", manifest).unwrap();
//!
//! let mut inputs = WitnessInputs::new();
//! inputs.insert("x".into(), InputValue::from(1u64));
//! inputs.insert("y".into(), InputValue::from(5u64));
//!
//! let witness = registry.generate_initial_witness("basic", &inputs).unwrap();
//! assert_eq!(witness[1], format!("0x{:064x}", 5));
//! ```

pub mod encoder;
pub mod error;
pub mod inputs;
pub mod manifest;
pub mod registry;

pub use encoder::{HexString, WitnessSequence, encode_scalar, encode_witness};
pub use error::{Result, WitgenError};
pub use inputs::{InputValue, WitnessInputs, inputs_from_json, inputs_from_json_str, parse_integer};
pub use manifest::Circuit;
pub use registry::CircuitRegistry;

/// Re-export the ABI types
pub use witgen_abi::{AbiDescription, AbiError, Parameter, Sign, TypeDescriptor};
