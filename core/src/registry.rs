//! Circuit Registry
//!
//! Keyed store of parsed circuits. Manifests are parsed before the write lock
//! is taken, so a failed registration never touches the store and the lock
//! only covers the map update.
//!
//! Entries are handed out as `Arc<Circuit>` snapshots; encoding runs outside
//! the lock.

use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use witgen_config::{WitgenConfig, global_config};

use crate::encoder::WitnessSequence;
use crate::error::{Result, WitgenError};
use crate::inputs::WitnessInputs;
use crate::manifest::Circuit;

static GLOBAL_REGISTRY: OnceLock<CircuitRegistry> = OnceLock::new();

#[derive(Debug, Default)]
struct RegistryState {
    circuits: HashMap<String, Arc<Circuit>>,
    /// Key of the most recently registered circuit
    latest: Option<String>,
}

#[derive(Debug, Default)]
pub struct CircuitRegistry {
    state: RwLock<RegistryState>,
    allow_missing_inputs: bool,
    manifest_dir: Option<String>,
}

impl CircuitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose `generate_initial_witness` skips missing inputs
    pub fn with_allow_missing_inputs(mut self, allow: bool) -> Self {
        self.allow_missing_inputs = allow;
        self
    }

    /// Directory that `register_named` resolves file names against
    pub fn with_manifest_dir(mut self, dir: impl Into<String>) -> Self {
        self.manifest_dir = Some(dir.into());
        self
    }

    pub fn from_config(config: &WitgenConfig) -> Self {
        Self {
            state: RwLock::default(),
            allow_missing_inputs: config.encoder.allow_missing_inputs,
            manifest_dir: config.registry.manifest_dir.clone(),
        }
    }

    /// Process-wide registry, built from the global config on first use
    pub fn global() -> &'static CircuitRegistry {
        GLOBAL_REGISTRY.get_or_init(|| Self::from_config(global_config()))
    }

    pub fn allow_missing_inputs(&self) -> bool {
        self.allow_missing_inputs
    }

    // Every critical section is a single map operation, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store an already parsed circuit under `key`, replacing any previous entry
    pub fn insert(&self, key: impl Into<String>, circuit: Circuit) {
        let key = key.into();
        let mut state = self.write();
        let replaced = state
            .circuits
            .insert(key.clone(), Arc::new(circuit))
            .is_some();
        state.latest = Some(key.clone());
        drop(state);

        if replaced {
            info!("Replaced circuit {}", key);
        } else {
            info!("Registered circuit {}", key);
        }
    }

    /// Parse manifest JSON and register it under `key`
    pub fn register(&self, key: impl Into<String>, manifest: &[u8]) -> Result<()> {
        let circuit = Circuit::from_json(manifest)?;
        debug!(
            "Parsed manifest: backend={}, parameters={}, bytecode={} bytes",
            circuit.backend(),
            circuit.abi().len(),
            circuit.acir().len()
        );
        self.insert(key, circuit);
        Ok(())
    }

    /// Read a manifest file and register it under `key`
    pub fn register_file(&self, key: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        let circuit = Circuit::from_file(path.as_ref())?;
        self.insert(key, circuit);
        Ok(())
    }

    /// Register a manifest by file name, looked up in the manifest directory
    pub fn register_named(&self, key: impl Into<String>, file_name: &str) -> Result<()> {
        let dir = self.manifest_dir.as_deref().ok_or_else(|| {
            WitgenError::ManifestLoad(format!(
                "No manifest directory configured to find {}",
                file_name
            ))
        })?;
        let path = Path::new(dir).join(file_name);
        if !path.is_file() {
            return Err(WitgenError::ManifestLoad(format!(
                "Couldn't find manifest file: {}",
                path.display()
            )));
        }
        self.register_file(key, path)
    }

    pub fn get(&self, key: &str) -> Result<Arc<Circuit>> {
        self.read()
            .circuits
            .get(key)
            .cloned()
            .ok_or_else(|| WitgenError::CircuitNotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().circuits.contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().circuits.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.read().circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().circuits.is_empty()
    }

    pub fn remove(&self, key: &str) -> Option<Arc<Circuit>> {
        let mut state = self.write();
        let removed = state.circuits.remove(key);
        if state.latest.as_deref() == Some(key) {
            state.latest = None;
        }
        removed
    }

    /// Decoded bytecode of the most recently registered circuit
    pub fn latest_bytecode(&self) -> Option<Vec<u8>> {
        let state = self.read();
        let key = state.latest.as_ref()?;
        state.circuits.get(key).map(|c| c.acir().to_vec())
    }

    /// Encode `inputs` for the circuit registered under `key`
    pub fn encode_witness(
        &self,
        key: &str,
        inputs: &WitnessInputs,
        allow_missing_inputs: bool,
    ) -> Result<WitnessSequence> {
        self.get(key)?.encode_witness(inputs, allow_missing_inputs)
    }

    /// Encode using the registry's configured missing-input policy
    pub fn generate_initial_witness(
        &self,
        key: &str,
        inputs: &WitnessInputs,
    ) -> Result<WitnessSequence> {
        self.encode_witness(key, inputs, self.allow_missing_inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::InputValue;

    fn manifest(backend: &str, bytecode: &str, params: &str) -> String {
        format!(
            r#"{{"backend": "{}", "bytecode": "{}", "abi": {{"parameters": [{}], "param_witnesses": {{}}}}}}"#,
            backend, bytecode, params
        )
    }

    fn field(name: &str) -> String {
        format!(
            r#"{{"name": "{}", "type": {{"kind": "field"}}, "visibility": "private"}}"#,
            name
        )
    }

    #[test]
    fn test_register_and_get() {
        let registry = CircuitRegistry::new();
        registry
            .register("basic", manifest("b", "AQI=", &field("x")).as_bytes())
            .unwrap();

        assert!(registry.contains("basic"));
        assert_eq!(registry.len(), 1);
        let circuit = registry.get("basic").unwrap();
        assert_eq!(circuit.backend(), "b");
        assert_eq!(circuit.acir(), &[1, 2]);
    }

    #[test]
    fn test_get_missing() {
        let registry = CircuitRegistry::new();
        assert_eq!(
            registry.get("nope").unwrap_err(),
            WitgenError::CircuitNotFound("nope".into())
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reregister_replaces() {
        let registry = CircuitRegistry::new();
        registry
            .register("c", manifest("v1", "AQ==", &field("x")).as_bytes())
            .unwrap();
        let old = registry.get("c").unwrap();

        let params = format!("{}, {}", field("x"), field("y"));
        registry
            .register("c", manifest("v2", "Ag==", &params).as_bytes())
            .unwrap();

        let new = registry.get("c").unwrap();
        assert_eq!(new.backend(), "v2");
        assert_eq!(new.abi().len(), 2);
        // snapshots handed out earlier are untouched
        assert_eq!(old.backend(), "v1");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_register_leaves_registry_unchanged() {
        let registry = CircuitRegistry::new();
        registry
            .register("c", manifest("v1", "AQ==", &field("x")).as_bytes())
            .unwrap();

        let err = registry
            .register("c", manifest("v2", "%%%", &field("x")).as_bytes())
            .unwrap_err();
        assert!(matches!(err, WitgenError::InvalidBytecodeEncoding(_)));

        let err = registry.register("d", b"not json").unwrap_err();
        assert!(matches!(err, WitgenError::ManifestParse(_)));

        assert_eq!(registry.keys(), vec!["c".to_string()]);
        assert_eq!(registry.get("c").unwrap().backend(), "v1");
        assert_eq!(registry.latest_bytecode(), Some(vec![1]));
    }

    #[test]
    fn test_latest_bytecode_is_per_entry() {
        let registry = CircuitRegistry::new();
        assert_eq!(registry.latest_bytecode(), None);

        registry
            .register("a", manifest("b", "AQ==", &field("x")).as_bytes())
            .unwrap();
        registry
            .register("b", manifest("b", "Ag==", &field("x")).as_bytes())
            .unwrap();

        assert_eq!(registry.latest_bytecode(), Some(vec![2]));
        // the earlier circuit keeps its own bytecode
        assert_eq!(registry.get("a").unwrap().acir(), &[1]);

        registry.remove("b");
        assert_eq!(registry.latest_bytecode(), None);
        assert!(registry.remove("b").is_none());
    }

    #[test]
    fn test_generate_initial_witness_uses_policy() {
        let params = format!("{}, {}", field("x"), field("y"));
        let mut inputs = WitnessInputs::new();
        inputs.insert("x".into(), InputValue::from(1u64));

        let strict = CircuitRegistry::new();
        strict
            .register("c", manifest("b", "", &params).as_bytes())
            .unwrap();
        assert_eq!(
            strict.generate_initial_witness("c", &inputs).unwrap_err(),
            WitgenError::MissingInput("y".into())
        );

        let lenient = CircuitRegistry::new().with_allow_missing_inputs(true);
        lenient
            .register("c", manifest("b", "", &params).as_bytes())
            .unwrap();
        assert_eq!(
            lenient.generate_initial_witness("c", &inputs).unwrap(),
            vec![format!("0x{:064x}", 1)]
        );
    }

    #[test]
    fn test_encode_unknown_key() {
        let registry = CircuitRegistry::new();
        let err = registry
            .encode_witness("missing", &WitnessInputs::new(), false)
            .unwrap_err();
        assert_eq!(err, WitgenError::CircuitNotFound("missing".into()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_config() {
        let mut config = WitgenConfig::default();
        config.encoder.allow_missing_inputs = true;
        config.registry.manifest_dir = Some("/tmp/circuits".into());

        let registry = CircuitRegistry::from_config(&config);
        assert!(registry.allow_missing_inputs());
        assert_eq!(registry.manifest_dir.as_deref(), Some("/tmp/circuits"));
    }

    #[test]
    fn test_register_named_without_dir() {
        let registry = CircuitRegistry::new();
        let err = registry.register_named("c", "basic.json").unwrap_err();
        assert!(matches!(err, WitgenError::ManifestLoad(_)));
    }
}
