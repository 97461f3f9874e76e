//! Maps failures to HTTP responses with a uniform `ErrorBody` payload.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use common::error::DeploymentError;
use common::requests::ErrorBody;
use log::error;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    pub fn session_not_found(session_id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "session_not_found",
            format!("Session {} not found", session_id),
        )
    }

    pub fn not_generated() -> Self {
        Self::new(
            StatusCode::CONFLICT,
            "not_generated",
            "Fill in the required fields and generate the SQL script first",
        )
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.body)
    }
}

impl From<DeploymentError> for ApiError {
    fn from(err: DeploymentError) -> Self {
        if err.is_validation() {
            Self::new(StatusCode::BAD_REQUEST, err.code(), err.to_string())
        } else {
            error!("rendering failed: {}", err);
            Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                err.code(),
                "Internal error while rendering the deployment script",
            )
        }
    }
}
