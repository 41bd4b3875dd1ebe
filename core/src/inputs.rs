//! Witness inputs
//!
//! Values handed to the encoder are a closed set of tags. Every tag is
//! checked against the parameter type, and a mismatch is an error.
//!
//! Inputs can also be read from a JSON document in the shape nargo writes
//! for `Prover.toml` values:
//!
//! ```text
//! {
//!     "x": 1,
//!     "y": "0x2a",
//!     "z": "-7",
//!     "a": [72, 101, 108, 108, 111]
//! }
//! ```

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Num;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Result, WitgenError};

/// Named inputs for one witness
pub type WitnessInputs = HashMap<String, InputValue>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputValue {
    /// Raw bytes; one byte per array element
    Bytes(Vec<u8>),
    Integer(BigInt),
    U8(u8),
}

impl InputValue {
    pub fn bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::Bytes(bytes.as_ref().to_vec())
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Integer(_) => "integer",
            Self::U8(_) => "u8",
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Scalar value, if this is a scalar tag
    pub fn to_integer(&self) -> Option<BigInt> {
        match self {
            Self::Integer(v) => Some(v.clone()),
            Self::U8(v) => Some(BigInt::from(*v)),
            Self::Bytes(_) => None,
        }
    }
}

impl From<u8> for InputValue {
    fn from(v: u8) -> Self {
        Self::U8(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for InputValue {
                fn from(v: $t) -> Self {
                    Self::Integer(BigInt::from(v))
                }
            }
        )*
    };
}

impl_from_int!(u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl From<BigInt> for InputValue {
    fn from(v: BigInt) -> Self {
        Self::Integer(v)
    }
}

impl From<BigUint> for InputValue {
    fn from(v: BigUint) -> Self {
        Self::Integer(BigInt::from_biguint(Sign::Plus, v))
    }
}

impl From<Vec<u8>> for InputValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for InputValue {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for InputValue {
    fn from(v: [u8; N]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

/// Parse an integer written in decimal or `0x` hex, with an optional `-`
pub fn parse_integer(s: &str) -> Option<BigInt> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => BigInt::from_str_radix(hex, 16).ok()?,
        None => BigInt::from_str_radix(digits, 10).ok()?,
    };
    // from_str_radix accepts its own sign; reject "--1" and "0x-1"
    if magnitude.sign() == Sign::Minus {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

fn invalid(name: &str, reason: impl Into<String>) -> WitgenError {
    WitgenError::InvalidInput {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn value_from_json(name: &str, value: &Value) -> Result<InputValue> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(InputValue::from(v))
            } else if let Some(v) = n.as_i64() {
                Ok(InputValue::from(v))
            } else {
                Err(invalid(name, format!("{} is not an integer", n)))
            }
        }
        Value::String(s) => parse_integer(s)
            .map(InputValue::Integer)
            .ok_or_else(|| invalid(name, format!("cannot parse {:?} as an integer", s))),
        Value::Array(items) => {
            let mut bytes = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let byte = item
                    .as_u64()
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| invalid(name, format!("element {} is not a byte", i)))?;
                bytes.push(byte);
            }
            Ok(InputValue::Bytes(bytes))
        }
        other => Err(invalid(name, format!("unsupported JSON value {}", other))),
    }
}

/// Build witness inputs from a JSON object
pub fn inputs_from_json(doc: &Value) -> Result<WitnessInputs> {
    let object = doc
        .as_object()
        .ok_or_else(|| invalid("<root>", "inputs must be a JSON object"))?;

    let mut inputs = WitnessInputs::with_capacity(object.len());
    for (name, value) in object {
        inputs.insert(name.clone(), value_from_json(name, value)?);
    }
    Ok(inputs)
}

/// Build witness inputs from JSON text
pub fn inputs_from_json_str(json: &str) -> Result<WitnessInputs> {
    let doc: Value =
        serde_json::from_str(json).map_err(|e| invalid("<root>", e.to_string()))?;
    inputs_from_json(&doc)
}
