//! Initial witness encoding
//!
//! Walks the ABI in declaration order and renders every supplied input as
//! one or more fixed-width hex slots:
//!
//! ```text
//! field       x = 5            -> 0x000...0005            (64 digits)
//! u32         d = 8            -> 0x00000008
//! [u8; 3]     a = [1, 2, 255]  -> 0x01, 0x02, 0xff
//! [Field; 2]  b = [1, 2]       -> 0x000...01, 0x000...02  (64 digits each)
//! ```
//!
//! Array inputs are byte buffers; each byte fills one slot padded to the
//! element width. Nested arrays and field elements use the field width.

use log::debug;
use num_bigint::{BigInt, Sign};
use witgen_abi::{AbiDescription, Parameter, TypeDescriptor, hex_digits};

use crate::error::{Result, WitgenError};
use crate::inputs::{InputValue, WitnessInputs};

pub type HexString = String;

/// Ordered witness values, one per slot
pub type WitnessSequence = Vec<HexString>;

/// Left-pad a lowercase hex string to `max_digits` and prefix `0x`.
///
/// Fails instead of truncating when `hex` is already longer than the slot.
fn pad_hex(name: &str, hex: &str, max_digits: usize) -> Result<HexString> {
    if hex.len() > max_digits {
        return Err(WitgenError::WidthOverflow {
            name: name.to_string(),
            digits: hex.len(),
            max_digits,
        });
    }
    Ok(format!("0x{:0>width$}", hex, width = max_digits))
}

/// Render a non-negative integer into a slot of `bits` width
pub fn encode_scalar(name: &str, value: &BigInt, bits: u32) -> Result<HexString> {
    if value.sign() == Sign::Minus {
        return Err(WitgenError::NegativeValue(name.to_string()));
    }
    pad_hex(name, &format!("{:02x}", value.magnitude()), hex_digits(bits))
}

fn type_mismatch(param: &Parameter, expected: &'static str, value: &InputValue) -> WitgenError {
    WitgenError::TypeMismatch {
        name: param.name.clone(),
        expected,
        found: value.kind_name(),
    }
}

fn encode_parameter(param: &Parameter, value: &InputValue, witness: &mut WitnessSequence) -> Result<()> {
    match &param.kind {
        TypeDescriptor::Array { length, element } => {
            let bytes = value
                .as_bytes()
                .ok_or_else(|| type_mismatch(param, "bytes", value))?;
            if bytes.len() != *length {
                return Err(WitgenError::LengthMismatch {
                    name: param.name.clone(),
                    got: bytes.len(),
                    want: *length,
                });
            }

            let max_digits = hex_digits(element.slot_bit_width());
            for byte in bytes {
                witness.push(pad_hex(&param.name, &format!("{:02x}", byte), max_digits)?);
            }
        }
        TypeDescriptor::Field | TypeDescriptor::Integer { .. } => {
            let integer = value
                .to_integer()
                .ok_or_else(|| type_mismatch(param, "integer", value))?;
            witness.push(encode_scalar(
                &param.name,
                &integer,
                param.kind.slot_bit_width(),
            )?);
        }
    }
    Ok(())
}

/// Encode `inputs` against `abi` into the initial witness.
///
/// A parameter with no input is an error unless `allow_missing_inputs` is set,
/// in which case it contributes no slots. The same rule applies to every
/// parameter type.
pub fn encode_witness(
    abi: &AbiDescription,
    inputs: &WitnessInputs,
    allow_missing_inputs: bool,
) -> Result<WitnessSequence> {
    let mut witness = WitnessSequence::new();

    for param in abi.iter() {
        let Some(value) = inputs.get(&param.name) else {
            if !allow_missing_inputs {
                return Err(WitgenError::MissingInput(param.name.clone()));
            }
            debug!("Skipping missing input {} ({})", param.name, param.kind.kind_name());
            continue;
        };

        let before = witness.len();
        encode_parameter(param, value, &mut witness)?;
        debug!(
            "Encoded {} ({}) into {} slot(s)",
            param.name,
            param.kind.kind_name(),
            witness.len() - before
        );
    }

    Ok(witness)
}
