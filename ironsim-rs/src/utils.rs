use rand::Rng;
use std::any::Any;

use serde_json::Value;

use crate::error::Error;
use crate::types::{Changes, TestResult};

/// Appends a random number to `name`, e.g. `test-chassis-1804289383`.
pub fn rand_name(name: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1..=0x7fff_ffff);
    format!("{name}-{suffix}")
}

/// A random locally administered MAC address in the `fa:16:3e` range.
pub fn rand_mac_address() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "fa:16:3e:{:02x}:{:02x}:{:02x}",
        rng.gen::<u8>(),
        rng.gen::<u8>(),
        rng.gen::<u8>()
    )
}

/// Unwraps a `json!({...})` literal into update arguments; anything but an
/// object yields no changes.
pub fn into_changes(value: Value) -> Changes {
    match value {
        Value::Object(changes) => changes,
        _ => Changes::new(),
    }
}

/// Turns the outcome of a test body, including a caught panic, into a result.
pub fn extract_test_results(outcome: Result<Result<(), Error>, Box<dyn Any + Send>>) -> TestResult {
    match outcome {
        Ok(Ok(())) => TestResult {
            pass: true,
            details: "".to_string(),
        },
        Ok(Err(err)) => TestResult {
            pass: false,
            details: err.to_string(),
        },
        Err(err) => {
            let err = if let Some(err) = err.downcast_ref::<&'static str>() {
                err.to_string()
            } else if let Some(err) = err.downcast_ref::<String>() {
                err.clone()
            } else {
                format!("?{:?}", err)
            };

            TestResult {
                pass: false,
                details: err,
            }
        }
    }
}
