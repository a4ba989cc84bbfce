use crate::domain::{LifecycleError, ReturnCopyError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// ドメインのエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Lifecycle(LifecycleError),
    /// 返却済みの貸出をもう一度返却しようとした
    AlreadyReturned,
    /// JSONボディを読めなかった（構文エラー、型不一致、日付の形式違いなど）
    Body(JsonRejection),
    /// 絞り込み条件などのクエリ値が不正
    BadRequest(String),
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        ApiError::Lifecycle(err)
    }
}

impl From<ReturnCopyError> for ApiError {
    fn from(err: ReturnCopyError) -> Self {
        match err {
            ReturnCopyError::Lifecycle(inner) => ApiError::Lifecycle(inner),
            ReturnCopyError::AlreadyReturned => ApiError::AlreadyReturned,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // 422 Unprocessable Entity - 入力検証・ビジネスルール違反
            ApiError::Lifecycle(ref err) => {
                let error_type = match err {
                    LifecycleError::InvalidDateInput { .. } => "INVALID_DATE_INPUT",
                    LifecycleError::MissingField { .. } => "MISSING_FIELD",
                    LifecycleError::NegativeFee { .. } => "NEGATIVE_FEE",
                };
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new(error_type, err.to_string()).with_field(err.field().as_str()),
                )
            }
            ApiError::AlreadyReturned => {
                let err = ReturnCopyError::AlreadyReturned;
                tracing::warn!("Return rejected: {}", err);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new("ALREADY_RETURNED", err.to_string()),
                )
            }

            // axumの判定したステータス（構文エラーは400、型不一致は422など）を保つ
            ApiError::Body(rejection) => {
                tracing::debug!("Request body rejected: {}", rejection.body_text());
                (
                    rejection.status(),
                    ErrorResponse::new("INVALID_BODY", rejection.body_text()),
                )
            }

            // 400 Bad Request - 解釈できないクエリ値
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", msg),
            ),
        };

        (status, Json(body)).into_response()
    }
}
