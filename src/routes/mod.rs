//! Actix-web JSON handlers wrapping the client store.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde_json::json;

use crate::domain::types::ClientId;
use crate::services::ServiceError;

pub mod api;
pub mod client;
pub mod main;

/// HTTP status used for each store error.
pub fn error_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::InvalidState(_) => StatusCode::CONFLICT,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders `err` as `{ "error": ... }` with the matching status.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let message = match err {
        ServiceError::Internal(_) => "internal error".to_string(),
        other => other.to_string(),
    };
    HttpResponse::build(error_status(err)).json(json!({ "error": message }))
}

/// Malformed ids can never match a record, so they read as not found.
pub fn parse_client_id(raw: &str) -> Result<ClientId, HttpResponse> {
    raw.parse::<ClientId>().map_err(|_| {
        log::warn!("Rejected malformed client id `{raw}`");
        error_response(&ServiceError::NotFound)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mappings() {
        assert_eq!(
            error_status(&ServiceError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(error_status(&ServiceError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            error_status(&ServiceError::InvalidState("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&ServiceError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn malformed_id_is_not_found() {
        let response = parse_client_id("42").unwrap_err();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(parse_client_id(&ClientId::new().to_string()).is_ok());
    }
}
