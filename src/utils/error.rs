use actix_web::{http::StatusCode, HttpResponse};
use std::fmt;

/// Errors surfaced by the service layer. Every variant maps to a status
/// code and a `{ "message": ... }` body at the request boundary; none is
/// fatal to the process.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    NotFound(String),
    Conflict(String),
    Forbidden(String),
    Unauthorized(String),
    LocationRequired,
    Validation(String),
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::LocationRequired => StatusCode::BAD_REQUEST,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::Forbidden(msg)
            | ServiceError::Unauthorized(msg)
            | ServiceError::Validation(msg)
            | ServiceError::Internal(msg) => write!(f, "{}", msg),
            ServiceError::LocationRequired => {
                write!(f, "Please set your location to find nearby peers")
            }
        }
    }
}

impl std::error::Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Conflict("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::Forbidden("x".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::LocationRequired.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn message_is_carried_verbatim() {
        let err = ServiceError::NotFound("Event not found".into());
        assert_eq!(err.to_string(), "Event not found");
    }
}
