use crate::application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError(ApplicationError::Validation(errors.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 404 Not Found - リクエストされたリソースが存在しない
            ApplicationError::RentalNotFound => (
                StatusCode::NOT_FOUND,
                "RENTAL_NOT_FOUND",
                "Sewa record not found".to_string(),
            ),
            ApplicationError::MemberNotFound => (
                StatusCode::NOT_FOUND,
                "MEMBER_NOT_FOUND",
                "Member not found".to_string(),
            ),
            ApplicationError::BookNotFound => (
                StatusCode::NOT_FOUND,
                "BOOK_NOT_FOUND",
                "Book not found".to_string(),
            ),
            ApplicationError::MemberOrBookNotFound => (
                StatusCode::NOT_FOUND,
                "MEMBER_OR_BOOK_NOT_FOUND",
                "Member or Book not found".to_string(),
            ),

            // 400 Bad Request - ビジネスルール違反・入力不正
            ApplicationError::RentalLimitExceeded => (
                StatusCode::BAD_REQUEST,
                "RENTAL_LIMIT_EXCEEDED",
                "Member already has 2 active rentals".to_string(),
            ),
            ApplicationError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }

            // 500 Internal Server Error - ストア障害
            // 詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApplicationError::StoreError(ref e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
