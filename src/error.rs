use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain errors surfaced to the routing layer. All are synchronous,
/// non-retryable and non-fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Card not found")]
    CardNotFound,
    #[error("Card already exists")]
    CardAlreadyExists,
    #[error("Invalid date format. Please use MM/yyyy.")]
    InvalidExpiryDate,
    #[error("User not found")]
    UserNotFound,
    #[error("User id already exists")]
    UserIdAlreadyExists,
    #[error("Token signature could not be verified")]
    InvalidSignature,
    #[error("Malformed token")]
    MalformedToken,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::CardNotFound | Error::UserNotFound => StatusCode::NOT_FOUND,
            Error::CardAlreadyExists | Error::UserIdAlreadyExists => StatusCode::CONFLICT,
            Error::InvalidExpiryDate => StatusCode::BAD_REQUEST,
            Error::InvalidSignature | Error::MalformedToken => StatusCode::UNAUTHORIZED,
            Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    status: u16,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        let body = ErrorBody {
            message: self.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_http() {
        assert_eq!(Error::CardNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::CardAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(Error::InvalidExpiryDate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::UserIdAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(Error::InvalidSignature.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::MalformedToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::Store(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
