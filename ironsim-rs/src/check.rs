use crate::error::{Error, Result};
use crate::types::Response;

/// Fails with [`Error::UnexpectedResponseCode`] when the status differs from
/// `expected`, unless the caller asked to tolerate errors.
pub fn check_response<T>(expected: u16, expect_errors: bool, response: Response<T>) -> Result<Response<T>> {
    let expected = expected.to_string();
    let received = response.status.to_string();

    if !expect_errors && received != expected {
        return Err(Error::UnexpectedResponseCode { expected, received });
    }

    Ok(response)
}
