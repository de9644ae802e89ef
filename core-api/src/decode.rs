//! Response validation and decoding

use bridge_traits::http::HttpResponse;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// Accept only `200..300`. Anything else becomes [`ApiError::BadStatus`]
/// carrying the code and the raw body for diagnostics.
pub fn validate(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::BadStatus {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

/// Parse a JSON body into `T`
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decoding(e.to_string()))
}

/// [`validate`] then [`decode`]
pub fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    validate(response)?;
    decode(&response.body)
}
