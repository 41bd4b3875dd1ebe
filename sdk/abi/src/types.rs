//! Parameter type descriptors
//!
//! A recursive description of a parameter's shape, decoded from the `type`
//! object of a manifest parameter:
//!
//! ```text
//! {"kind":"field"}
//! {"kind":"integer","sign":"unsigned","width":32}
//! {"kind":"array","length":8,"type":{"kind":"integer","sign":"unsigned","width":8}}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AbiError;

/// Canonical bit width of a field element
pub const FIELD_BITS: u32 = 256;

/// Number of hex digits needed for a slot of `bits` width
pub const fn hex_digits(bits: u32) -> usize {
    ((bits / 8) * 2) as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Signed,
    Unsigned,
}

/// Shape of a circuit parameter.
///
/// Dispatches on `kind`; any other discriminator fails to deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDescriptor {
    Field,
    Integer {
        sign: Sign,
        width: u32,
    },
    Array {
        length: usize,
        #[serde(rename = "type")]
        element: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn field() -> Self {
        Self::Field
    }

    pub fn unsigned(width: u32) -> Self {
        Self::Integer {
            sign: Sign::Unsigned,
            width,
        }
    }

    pub fn signed(width: u32) -> Self {
        Self::Integer {
            sign: Sign::Signed,
            width,
        }
    }

    pub fn array(length: usize, element: TypeDescriptor) -> Self {
        Self::Array {
            length,
            element: Box::new(element),
        }
    }

    /// Bit width of one witness slot of this type.
    ///
    /// Only integers carry their own width; fields and nested arrays use the
    /// field width.
    pub fn slot_bit_width(&self) -> u32 {
        match self {
            Self::Integer { width, .. } => *width,
            Self::Field | Self::Array { .. } => FIELD_BITS,
        }
    }

    /// Number of witness slots a value of this type occupies
    pub fn slot_count(&self) -> usize {
        match self {
            Self::Field | Self::Integer { .. } => 1,
            Self::Array { length, .. } => *length,
        }
    }

    /// Short name of the `kind` discriminator
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Integer { .. } => "integer",
            Self::Array { .. } => "array",
        }
    }

    /// Check that every integer width (including nested array elements) is a
    /// positive multiple of 8 no wider than a field element.
    pub fn validate(&self) -> Result<(), AbiError> {
        match self {
            Self::Field => Ok(()),
            Self::Integer { width, .. } => {
                if *width == 0 || width % 8 != 0 || *width > FIELD_BITS {
                    return Err(AbiError::InvalidWidth(*width));
                }
                Ok(())
            }
            Self::Array { element, .. } => element.validate(),
        }
    }
}
