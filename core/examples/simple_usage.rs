//! Register a manifest and print its initial witness.
//!
//! Run with: RUST_LOG=debug cargo run -p witgen-core --example simple_usage

use anyhow::Result;
use log::info;
use witgen_core::{CircuitRegistry, InputValue, WitnessInputs};

const MANIFEST: &[u8] = include_bytes!("../tests/fixtures/example.json");

fn main() -> Result<()> {
    env_logger::init();

    let registry = CircuitRegistry::global();
    let circuit_key = "witgen_example";
    registry.register(circuit_key, MANIFEST)?;

    let mut inputs = WitnessInputs::new();
    inputs.insert("a".into(), InputValue::bytes("Hello123"));
    inputs.insert("b".into(), InputValue::bytes("Hello123"));
    inputs.insert("c".into(), InputValue::from(0x01u8));
    inputs.insert("d".into(), InputValue::from(8u32));
    inputs.insert("e".into(), InputValue::from(16i64));
    inputs.insert("x".into(), InputValue::from(1u64));
    inputs.insert("y".into(), InputValue::from(2u64));

    let initial_witness = registry.generate_initial_witness(circuit_key, &inputs)?;
    info!("Encoded {} witness slots", initial_witness.len());

    println!("Initial witness: {:?}", initial_witness);
    Ok(())
}
