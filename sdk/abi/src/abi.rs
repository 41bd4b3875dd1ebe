use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AbiError;
use crate::types::TypeDescriptor;

/// A named circuit input
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TypeDescriptor,
    /// "public" / "private"; carried through, never enforced
    pub visibility: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: TypeDescriptor, visibility: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: visibility.into(),
        }
    }

    pub fn private(name: impl Into<String>, kind: TypeDescriptor) -> Self {
        Self::new(name, kind, "private")
    }

    pub fn public(name: impl Into<String>, kind: TypeDescriptor) -> Self {
        Self::new(name, kind, "public")
    }
}

/// Input contract of a circuit.
///
/// Parameter order is significant: it is the order of the witness.
/// Names are assumed unique (upheld by the compiler that wrote the manifest).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiDescription {
    pub parameters: Vec<Parameter>,
    /// Witness indices per parameter, passed through for downstream consumers
    #[serde(rename = "param_witnesses", default)]
    pub param_witnesses: BTreeMap<String, Vec<u32>>,
}

impl AbiDescription {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            param_witnesses: BTreeMap::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// Total witness slots when every input is supplied.
    ///
    /// Array lengths come from the manifest; the total saturates at `usize::MAX`.
    pub fn slot_count(&self) -> usize {
        self.parameters
            .iter()
            .fold(0usize, |acc, p| acc.saturating_add(p.kind.slot_count()))
    }

    pub fn validate(&self) -> Result<(), AbiError> {
        for param in &self.parameters {
            param.kind.validate().map_err(|e| AbiError::Parameter {
                name: param.name.clone(),
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}
