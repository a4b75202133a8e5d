use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use foodgram_shopping::ShoppingError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("authentication credentials were not provided or are invalid")]
    Unauthorized,

    #[error(transparent)]
    Command(#[from] foodgram_shared::Error),

    #[error(transparent)]
    Shopping(#[from] ShoppingError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Command(err) | AppError::Shopping(ShoppingError::Store(err)) => {
                command_status(err)
            }
            AppError::Shopping(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn command_status(err: &foodgram_shared::Error) -> StatusCode {
    use foodgram_shared::Error;

    match err {
        Error::Validate(_) | Error::User(_) => StatusCode::BAD_REQUEST,
        Error::Forbidden(_) => StatusCode::FORBIDDEN,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::Command(foodgram_shared::Error::User("taken".to_owned())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Command(foodgram_shared::Error::Forbidden("recipe".to_owned())),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::Shopping(ShoppingError::Store(foodgram_shared::Error::NotFound(
                    "recipe".to_owned(),
                ))),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Shopping(ShoppingError::MissingFont("mono.ttf".to_owned())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status);
        }
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let response = AppError::Shopping(ShoppingError::MissingFont("mono.ttf".to_owned()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"detail":"internal server error"}"#);
    }
}
