use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::ApiError;
use crate::application::ApplicationError;

/// JSONを読み込み、`Validate` を実行するエクストラクター
///
/// 不正なJSON、必須フィールドの欠落、型の不一致、検証エラーはすべて
/// `VALIDATION_ERROR`（400）として返す。
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(invalid_body)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::from(ApplicationError::Validation(rejection.body_text()))
}
