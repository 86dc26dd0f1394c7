use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{dao::storage::StorageError, fault_boundary::UnhandledFailure};

/// Domain failures a catalog operation may deliberately report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorKind {
    /// A game with the same name and producer already exists.
    AlreadyRegistered,
    /// No game carries the requested identifier.
    NotRegistered,
}

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Insertion rejected because the game is already in the catalog.
    #[error("{0}")]
    AlreadyRegistered(String),
    /// Mutation rejected because the game is not in the catalog.
    #[error("{0}")]
    NotRegistered(String),
    /// Storage backend failed.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
}

impl ServiceError {
    /// Domain classification, `None` for opaque failures.
    pub fn kind(&self) -> Option<DomainErrorKind> {
        match self {
            ServiceError::AlreadyRegistered(_) => Some(DomainErrorKind::AlreadyRegistered),
            ServiceError::NotRegistered(_) => Some(DomainErrorKind::NotRegistered),
            ServiceError::Unavailable(_) => None,
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

/// Mapping from domain failure kinds to the status codes an operation answers with.
pub type ErrorTranslation = &'static [(DomainErrorKind, StatusCode)];

/// Operations that do not translate any domain failure.
pub const NO_TRANSLATION: ErrorTranslation = &[];
/// Creation reports duplicates as unprocessable.
pub const CREATE_TRANSLATION: ErrorTranslation = &[(
    DomainErrorKind::AlreadyRegistered,
    StatusCode::UNPROCESSABLE_ENTITY,
)];
/// Update, price update and removal report unknown games as not found.
pub const MUTATE_TRANSLATION: ErrorTranslation =
    &[(DomainErrorKind::NotRegistered, StatusCode::NOT_FOUND)];

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Domain failure translated by the operation, answered with its message as plain text.
    #[error("{message}")]
    Domain {
        /// Status chosen by the operation's translation table.
        status: StatusCode,
        /// Domain message sent back verbatim.
        message: String,
    },
    /// Failure the operation does not translate; finalised by the fault boundary.
    #[error("unhandled failure: {0}")]
    Unhandled(String),
}

impl AppError {
    /// Translate a service failure through the operation's table.
    ///
    /// Kinds missing from `table` are left to the fault boundary, the same as
    /// any storage failure.
    pub fn translate(err: ServiceError, table: ErrorTranslation) -> Self {
        let status = err.kind().and_then(|kind| {
            table
                .iter()
                .find(|(candidate, _)| *candidate == kind)
                .map(|(_, status)| *status)
        });

        match status {
            Some(status) => AppError::Domain {
                status,
                message: err.to_string(),
            },
            None => AppError::Unhandled(describe(&err)),
        }
    }
}

/// Render an error together with its source chain for diagnostics.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                let payload = Json(ErrorBody {
                    message: format!("bad request: {message}"),
                });
                (StatusCode::BAD_REQUEST, payload).into_response()
            }
            AppError::Domain { status, message } => (status, message).into_response(),
            AppError::Unhandled(detail) => {
                let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                response.extensions_mut().insert(UnhandledFailure(detail));
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_translates_only_duplicates() {
        let err = AppError::translate(
            ServiceError::AlreadyRegistered("This game is already registered".into()),
            CREATE_TRANSLATION,
        );
        assert!(matches!(
            err,
            AppError::Domain { status: StatusCode::UNPROCESSABLE_ENTITY, ref message }
                if message == "This game is already registered"
        ));

        let err = AppError::translate(
            ServiceError::NotRegistered("This game is not registered".into()),
            CREATE_TRANSLATION,
        );
        assert!(matches!(err, AppError::Unhandled(_)));
    }

    #[test]
    fn mutate_translates_missing_games_to_not_found() {
        let err = AppError::translate(
            ServiceError::NotRegistered("This game is not registered".into()),
            MUTATE_TRANSLATION,
        );
        assert!(matches!(
            err,
            AppError::Domain { status: StatusCode::NOT_FOUND, .. }
        ));
    }

    #[test]
    fn storage_failures_are_never_translated() {
        let storage = StorageError::Malformed("bad id".into());
        let err = AppError::translate(ServiceError::Unavailable(storage), MUTATE_TRANSLATION);
        match err {
            AppError::Unhandled(detail) => {
                assert_eq!(detail, "storage unavailable: stored record is malformed: bad id")
            }
            other => panic!("unexpected translation: {other:?}"),
        }
    }

    #[test]
    fn unhandled_responses_carry_the_failure_marker() {
        let response = AppError::Unhandled("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let marker = response.extensions().get::<UnhandledFailure>().unwrap();
        assert_eq!(marker.0, "boom");
    }
}
