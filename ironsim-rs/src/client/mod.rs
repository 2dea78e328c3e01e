mod baremetal;
mod credentials;

pub use baremetal::BaremetalClient;
pub use credentials::CredentialsClient;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::transport::{Headers, RawResponse};

fn json_headers() -> Headers {
    Headers::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ])
}

fn decode<T: DeserializeOwned>(raw: &RawResponse) -> Result<T> {
    Ok(serde_json::from_str(&raw.body)?)
}

/// Decodes a body of the form `{"<key>": <T>}`. Fault bodies carry no such
/// wrapper: on a non-2xx status the body is decoded as `T` itself, falling
/// back to `T::default()` when it does not fit.
fn decode_wrapped<T: DeserializeOwned + Default>(raw: &RawResponse, key: &'static str) -> Result<T> {
    let mut body: Value = decode(raw)?;
    if let Some(inner) = body.get_mut(key).map(Value::take) {
        return Ok(serde_json::from_value(inner)?);
    }
    if (200..300).contains(&raw.status) {
        return Err(Error::Decode(serde::de::Error::missing_field(key)));
    }
    Ok(serde_json::from_value(body).unwrap_or_default())
}
