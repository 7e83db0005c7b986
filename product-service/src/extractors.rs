use crate::error::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

/// Body extractor that accepts JSON and URL-encoded payloads.
///
/// An absent or unrecognized content type (and an empty body) deserializes as
/// an empty field set, leaving the response to the handler's required-field
/// validation rather than to the transport layer.
pub struct JsonOrForm<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_default();

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {}", e)))?;

        let fields = if bytes.is_empty() {
            serde_json::from_slice(b"{}")
                .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?
        } else if content_type.starts_with("application/json") {
            serde_json::from_slice(&bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            serde_urlencoded::from_bytes(&bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid form body: {}", e)))?
        } else {
            serde_json::from_slice(b"{}")
                .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?
        };

        Ok(JsonOrForm(fields))
    }
}
