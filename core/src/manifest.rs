//! Circuit manifests
//!
//! A manifest is the JSON artifact the Noir compiler writes for a program:
//!
//! ```text
//! {
//!     "backend": "acvm-backend-barretenberg",
//!     "bytecode": "<base64 ACIR>",
//!     "abi": {
//!         "parameters": [{"name": "x", "type": {"kind": "field"}, "visibility": "private"}],
//!         "param_witnesses": {"x": [1]}
//!     }
//! }
//! ```
//!
//! Any other top-level fields are ignored.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use witgen_abi::AbiDescription;

use crate::encoder::{WitnessSequence, encode_witness};
use crate::error::{Result, WitgenError};
use crate::inputs::WitnessInputs;

/// Manifest fields as they appear on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawManifest {
    backend: String,
    bytecode: String,
    abi: AbiDescription,
}

/// A parsed circuit: ABI plus decoded bytecode. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    backend: String,
    bytecode: String,
    abi: AbiDescription,
    acir: Vec<u8>,
}

impl Circuit {
    /// Parse a manifest from JSON bytes and decode its bytecode
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_slice(data).map_err(|e| WitgenError::ManifestParse(e.to_string()))?;

        raw.abi
            .validate()
            .map_err(|e| WitgenError::ManifestParse(e.to_string()))?;

        let bytecode = raw.bytecode.trim().to_string();
        let acir = STANDARD
            .decode(&bytecode)
            .map_err(|e| WitgenError::InvalidBytecodeEncoding(e.to_string()))?;

        Ok(Self {
            backend: raw.backend,
            bytecode,
            abi: raw.abi,
            acir,
        })
    }

    /// Read and parse a manifest file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|e| {
            WitgenError::ManifestLoad(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&data)
    }

    /// Build a circuit from parts already in memory.
    ///
    /// The ABI is validated the same way a parsed manifest is.
    pub fn new(backend: impl Into<String>, acir: Vec<u8>, abi: AbiDescription) -> Result<Self> {
        abi.validate()
            .map_err(|e| WitgenError::ManifestParse(e.to_string()))?;
        Ok(Self {
            backend: backend.into(),
            bytecode: STANDARD.encode(&acir),
            abi,
            acir,
        })
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Base64 bytecode from the manifest, surrounding whitespace removed
    pub fn bytecode(&self) -> &str {
        &self.bytecode
    }

    /// Decoded bytecode
    pub fn acir(&self) -> &[u8] {
        &self.acir
    }

    pub fn abi(&self) -> &AbiDescription {
        &self.abi
    }

    /// Serialize back into manifest JSON
    pub fn to_json(&self) -> Result<String> {
        let raw = RawManifest {
            backend: self.backend.clone(),
            bytecode: self.bytecode.clone(),
            abi: self.abi.clone(),
        };
        serde_json::to_string(&raw).map_err(|e| WitgenError::Serialization(e.to_string()))
    }

    pub fn encode_witness(
        &self,
        inputs: &WitnessInputs,
        allow_missing_inputs: bool,
    ) -> Result<WitnessSequence> {
        encode_witness(&self.abi, inputs, allow_missing_inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use witgen_abi::{Parameter, TypeDescriptor};

    const MANIFEST: &str = r#"{
        "noir_version": "0.10.5",
        "backend": "acvm-backend-barretenberg",
        "bytecode": "AQIDBA==",
        "abi": {
            "parameters": [
                {"name": "x", "type": {"kind": "field"}, "visibility": "private"},
                {"name": "y", "type": {"kind": "integer", "sign": "unsigned", "width": 32}, "visibility": "public"}
            ],
            "param_witnesses": {"x": [1], "y": [2]}
        }
    }"#;

    #[test]
    fn test_from_json() {
        let circuit = Circuit::from_json(MANIFEST.as_bytes()).unwrap();
        assert_eq!(circuit.backend(), "acvm-backend-barretenberg");
        assert_eq!(circuit.bytecode(), "AQIDBA==");
        assert_eq!(circuit.acir(), &[1, 2, 3, 4]);
        assert_eq!(circuit.abi().names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(circuit.abi().param_witnesses["y"], vec![2]);
    }

    #[test]
    fn test_bytecode_whitespace_trimmed() {
        let manifest = MANIFEST.replace("\"AQIDBA==\"", "\"  AQIDBA==\\n\"");
        let circuit = Circuit::from_json(manifest.as_bytes()).unwrap();
        assert_eq!(circuit.bytecode(), "AQIDBA==");
        assert_eq!(circuit.acir(), &[1, 2, 3, 4]);

        let reparsed = Circuit::from_json(circuit.to_json().unwrap().as_bytes()).unwrap();
        assert_eq!(reparsed.bytecode(), circuit.bytecode());
    }

    #[test]
    fn test_width_wider_than_field() {
        let manifest = MANIFEST.replace("\"width\": 32", "\"width\": 4294967288");
        let err = Circuit::from_json(manifest.as_bytes()).unwrap_err();
        assert!(matches!(err, WitgenError::ManifestParse(ref msg) if msg.contains("4294967288")));
    }

    #[test]
    fn test_invalid_json() {
        let err = Circuit::from_json(b"{\"backend\": 1}").unwrap_err();
        assert!(matches!(err, WitgenError::ManifestParse(_)));
    }

    #[test]
    fn test_unknown_kind() {
        let manifest = MANIFEST.replace(r#"{"kind": "field"}"#, r#"{"kind": "struct"}"#);
        let err = Circuit::from_json(manifest.as_bytes()).unwrap_err();
        assert!(matches!(err, WitgenError::ManifestParse(_)));
    }

    #[test]
    fn test_invalid_width() {
        let manifest = MANIFEST.replace("\"width\": 32", "\"width\": 30");
        let err = Circuit::from_json(manifest.as_bytes()).unwrap_err();
        assert!(matches!(err, WitgenError::ManifestParse(ref msg) if msg.contains("parameter y")));
    }

    #[test]
    fn test_invalid_bytecode() {
        let manifest = MANIFEST.replace("AQIDBA==", "not base64!");
        let err = Circuit::from_json(manifest.as_bytes()).unwrap_err();
        assert!(matches!(err, WitgenError::InvalidBytecodeEncoding(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Circuit::from_file(Path::new("/nonexistent/circuit.json")).unwrap_err();
        assert!(matches!(err, WitgenError::ManifestLoad(_)));
    }

    #[test]
    fn test_to_json_reparses() {
        let circuit = Circuit::from_json(MANIFEST.as_bytes()).unwrap();
        let json = circuit.to_json().unwrap();
        assert_eq!(Circuit::from_json(json.as_bytes()).unwrap(), circuit);
    }

    #[test]
    fn test_new_validates_abi() {
        let abi = AbiDescription::new(vec![Parameter::private("x", TypeDescriptor::unsigned(4))]);
        assert!(matches!(
            Circuit::new("mock", vec![], abi),
            Err(WitgenError::ManifestParse(_))
        ));

        let abi = AbiDescription::new(vec![Parameter::private("x", TypeDescriptor::field())]);
        let circuit = Circuit::new("mock", vec![0xde, 0xad], abi).unwrap();
        assert_eq!(circuit.bytecode(), "3q0=");
    }
}
