use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::{database, types::Error as ErrorType};

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.error_type {
            ErrorType::Validation(..) => StatusCode::BAD_REQUEST,
            ErrorType::Conflict => StatusCode::CONFLICT,
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        // Internal detail stays out of production logs because the
        // production subscriber filters below the debug level.
        tracing::debug!(
            report = ?self.report,
            trace = %self.trace,
            "request failed: {}", self.error_type,
        );
        HttpResponse::build(self.status_code()).json(&self.error_type)
    }
}

impl From<Report<database::Error>> for Error {
    fn from(value: Report<database::Error>) -> Self {
        Error::from_report(ErrorType::Internal, value)
    }
}
