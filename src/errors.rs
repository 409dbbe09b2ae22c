use thiserror::Error;

/// Failures reported by the resource store, split so callers can branch on
/// the conditions that matter: not-found and version-conflict are handled
/// differently from generic API or transport failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("version conflict: {0}")]
    Conflict(String),

    #[error("api error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<kube::Error> for StoreError {
    fn from(e: kube::Error) -> Self {
        match e {
            kube::Error::Api(ae) if ae.code == 404 => {
                StoreError::NotFound(ae.message)
            }
            kube::Error::Api(ae)
                if ae.code == 409 && ae.reason == "AlreadyExists" =>
            {
                StoreError::AlreadyExists(ae.message)
            }
            kube::Error::Api(ae) if ae.code == 409 => {
                StoreError::Conflict(ae.message)
            }
            kube::Error::Api(ae) => StoreError::Api {
                code: ae.code,
                message: ae.message,
            },
            other => StoreError::Transport(other.to_string()),
        }
    }
}

/// Outcome of the conflict-retry updater. Conflicts are retried internally;
/// everything else lands here once.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("update failed: {0}")]
    Fatal(#[from] StoreError),

    #[error("retry budget exhausted after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: StoreError },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::{Json, http::StatusCode};
        use serde_json::json;

        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
