use axum::extract::FromRequest;

use super::error::ApiError;

/// `axum::Json`の代わりに使うJSON抽出器
///
/// 読み取りに失敗した場合も`{error, message}`形式で返す。
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
