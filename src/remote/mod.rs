//! Remote user directory loader.
//!
//! The plugin issues a single `GET` per session through Zellij's
//! `web_request`; the host answers with a `WebRequestResult` event carrying the
//! status and raw body. This module owns the request parameters and turns the
//! response into the typed outcome the query store consumes.

use crate::domain::{LoadError, UserRecord};
use std::collections::BTreeMap;

/// Endpoint used when no `endpoint` is configured.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Context key attached to the request so responses can be recognized.
pub const REQUEST_CONTEXT_KEY: &str = "userdeck";

/// Request headers sent with the fetch.
#[must_use]
pub fn request_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Accept".to_string(), "application/json".to_string())])
}

/// Context map attached to the request, echoed back by the host.
#[must_use]
pub fn request_context(url: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(REQUEST_CONTEXT_KEY.to_string(), url.to_string())])
}

/// Whether a `WebRequestResult` context belongs to the user fetch.
#[must_use]
pub fn is_user_response(context: &BTreeMap<String, String>) -> bool {
    context.contains_key(REQUEST_CONTEXT_KEY)
}

/// Decodes a fetch response into the user list.
///
/// # Errors
///
/// - [`LoadError::Status`] for any status outside `200..300`
/// - [`LoadError::Decode`] when the body is not a JSON array of users
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<UserRecord>, LoadError> {
    if !(200..300).contains(&status) {
        return Err(LoadError::Status(status));
    }

    let users: Vec<UserRecord> =
        serde_json::from_slice(body).map_err(|e| LoadError::Decode(e.to_string()))?;

    tracing::debug!(status, user_count = users.len(), bytes = body.len(), "user payload decoded");
    Ok(users)
}
