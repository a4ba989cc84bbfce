#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rusty_library_lending::{
    adapters::mock::FixedClock,
    api::{handlers::AppState, router::create_router},
    config::LendingConfig,
};
use std::sync::Arc;

/// テスト用のアプリケーションを作成
///
/// 時計は固定時刻のモックを注入し、延滞判定を決定的にする。
pub fn create_test_app(config: LendingConfig, now: DateTime<Utc>) -> Router {
    create_test_app_with_clock(config, now).0
}

/// 時計を進めるテスト用に、モックの時計も一緒に返す
pub fn create_test_app_with_clock(
    config: LendingConfig,
    now: DateTime<Utc>,
) -> (Router, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(now));
    let app_state = Arc::new(AppState {
        config,
        clock: clock.clone(),
    });
    (create_router(app_state), clock)
}

/// JSONボディ付きのPOSTリクエスト
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// レスポンスボディをJSONとして読み出す
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 指定日の正午（UTC）
pub fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    date(y, m, d).and_hms_opt(12, 0, 0).unwrap().and_utc()
}
