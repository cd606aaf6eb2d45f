use error_stack::{Context, Report};
use std::borrow::Cow;
use thiserror::Error as ThisError;
use tracing_error::SpanTrace;

use crate::types;

mod impls;

pub type Result<T> = std::result::Result<T, Error>;

/// The error type carried by every route handler and service call.
///
/// It pairs the public taxonomy ([`types::Error`]) that decides the status
/// code and response body with the internal [`Report`] and captured span
/// trace used for logging. Nothing from the report ever reaches a client.
pub struct Error {
    error_type: types::Error,
    report: Report<types::Error>,
    trace: SpanTrace,
}

impl Error {
    #[must_use]
    pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
        let report = Report::new(context).change_context(error_type.clone());
        Self {
            error_type,
            report,
            trace: SpanTrace::capture(),
        }
    }

    #[must_use]
    pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
        let report = report.change_context(error_type.clone());
        Self {
            error_type,
            report,
            trace: SpanTrace::capture(),
        }
    }
}

#[derive(Debug, ThisError)]
#[error("request rejected by input validation")]
struct RejectedInput;

#[derive(Debug, ThisError)]
#[error("no record matched the request")]
struct NoMatchingRecord;

#[derive(Debug, ThisError)]
#[error("password comparison did not match")]
struct BadCredentials;

impl Error {
    #[must_use]
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_context(types::Error::Validation(message.into()), RejectedInput)
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self::from_context(types::Error::NotFound, NoMatchingRecord)
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::from_context(types::Error::Unauthorized, BadCredentials)
    }
}

impl Error {
    #[must_use]
    pub fn as_type(&self) -> &types::Error {
        &self.error_type
    }

    #[must_use]
    pub fn change_type(mut self, error_type: types::Error) -> Self {
        self.error_type = error_type;
        self
    }

    #[must_use]
    pub fn downcast_ref<F: Context>(&self) -> Option<&F> {
        self.report.downcast_ref::<F>()
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("type", &self.error_type)
            .field("report", &self.report)
            .field("trace", &self.trace)
            .finish()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", &self.error_type)?;
        writeln!(f, "{:?}", self.report)?;
        std::fmt::Display::fmt(&self.trace, f)
    }
}
