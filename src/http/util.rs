use actix_web::error::JsonPayloadError;
use actix_web::HttpRequest;
use thiserror::Error as ThisError;

use super::Error;
use crate::types;

#[derive(Debug, ThisError)]
#[error("request body rejected by the JSON parser")]
struct RejectedPayload;

/// Maps actix's own JSON extraction failures into the uniform failure
/// envelope so a malformed body never produces a bare text response.
///
/// Registered through [`actix_web::web::JsonConfig::error_handler`].
pub fn handle_json_error(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(%error, "rejected request body");
    Error::from_context(
        types::Error::Validation("Invalid JSON body.".into()),
        RejectedPayload,
    )
    .into()
}
