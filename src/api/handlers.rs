use crate::application::{
    borrowing::{BorrowDraft, OverdueNotice, ReturnDraft, detect_overdue_borrowings},
    search::{BorrowingFilter, FilterContext, SearchQuery},
};
use crate::config::LendingConfig;
use crate::domain::{
    Borrowing, Field, LoanPeriod, NewBorrowing,
    borrowing::borrow_copy,
    dates::parse_calendar_date,
    due_date::default_due_date,
    fees,
    reservation::{Reservation, ReservationStatus},
    status::derive_status,
};
use crate::ports::clock::Clock;
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::{
    error::ApiError,
    extract::AppJson,
    types::{
        BorrowingListItem, BorrowingSearchRequest, DueDateRequest, DueDateResponse,
        LateFeeRequest, LateFeeResponse, OverdueRequest, ReservationSearchRequest, ReturnRequest,
        ReturnResponse, StatusRequest, StatusResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態（読み取り専用）
pub struct AppState {
    pub config: LendingConfig,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// リクエストに基準時刻があればそれを、なければ時計の現在時刻を使う
    fn now(&self, as_of: Option<DateTime<Utc>>) -> DateTime<Utc> {
        as_of.unwrap_or_else(|| self.clock.now())
    }

    fn filter_context(&self, as_of: Option<DateTime<Utc>>) -> FilterContext {
        FilterContext {
            now: self.now(as_of),
            boundary: self.config.overdue_boundary,
        }
    }
}

// ============================================================================
// Calculation handlers
// ============================================================================

/// POST /borrowings/status - 表示用の貸出状態を導出
pub async fn borrowing_status(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<StatusRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    req.borrowing.validate()?;
    let now = state.now(req.as_of);
    let status = derive_status(&req.borrowing, now, state.config.overdue_boundary);

    Ok(Json(StatusResponse {
        borrowing_id: req.borrowing.id.as_str().to_string(),
        status,
    }))
}

/// POST /borrowings/late-fee - 返却期限と返却日から延滞料金を計算
pub async fn late_fee(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LateFeeRequest>,
) -> Result<Json<LateFeeResponse>, ApiError> {
    let due_date = parse_calendar_date(Field::DueDate, &req.due_date)?;
    let return_date = parse_calendar_date(Field::ReturnDate, &req.return_date)?;

    let fee = fees::late_fee(due_date, return_date, state.config.daily_rate);

    Ok(Json(LateFeeResponse {
        overdue_days: fees::overdue_days(due_date, return_date),
        late_fee: fee.value(),
        formatted: fee.format(&state.config.currency_code),
    }))
}

/// POST /borrowings/due-date - 標準の返却期限を提案
pub async fn propose_due_date(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<DueDateRequest>,
) -> Result<Json<DueDateResponse>, ApiError> {
    let borrow_date = parse_calendar_date(Field::BorrowDate, &req.borrow_date)?;
    let loan_period = match req.loan_period_days {
        Some(days) => LoanPeriod::try_from(days).map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => state.config.loan_period,
    };

    let due_date = default_due_date(borrow_date, loan_period)?;

    Ok(Json(DueDateResponse {
        due_date: due_date.format("%Y-%m-%d").to_string(),
    }))
}

// ============================================================================
// Lifecycle handlers
// ============================================================================

/// POST /borrowings - 貸出フォームを検証して新規の貸出記録を作る
///
/// 永続化はしない。返した記録を呼び出し側がバックエンドへ送る。
pub async fn create_borrowing(
    State(state): State<Arc<AppState>>,
    AppJson(draft): AppJson<BorrowDraft>,
) -> Result<(StatusCode, Json<NewBorrowing>), ApiError> {
    let policy = state.config.policy();
    let cmd = draft.validate(&policy)?;
    let new_borrowing = borrow_copy(cmd, &policy)?;

    tracing::info!(
        copy_id = new_borrowing.copy_id.as_str(),
        due_date = %new_borrowing.due_date,
        "borrowing prepared"
    );

    Ok((StatusCode::CREATED, Json(new_borrowing)))
}

/// POST /borrowings/return - 返却を確定し延滞料金を記録する
pub async fn return_borrowing(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ReturnRequest>,
) -> Result<Json<ReturnResponse>, ApiError> {
    let policy = state.config.policy();
    let return_date = parse_calendar_date(Field::ReturnDate, &req.return_date)?;

    let mut draft = ReturnDraft::new(&req.borrowing, return_date, &policy);
    if let Some(amount) = req.late_fee_override {
        draft.override_fee(amount)?;
    }

    let (borrowing, summary) =
        draft.submit(&req.borrowing, req.condition_after, req.notes, &policy)?;
    let formatted_fee = borrowing.late_fee.format(&state.config.currency_code);

    Ok(Json(ReturnResponse {
        borrowing,
        summary,
        formatted_fee,
    }))
}

// ============================================================================
// List handlers
// ============================================================================

/// POST /borrowings/search - 検索語とステータスで貸出一覧を絞り込む
///
/// ステータス: borrowed, returned, active, overdue（active/overdueは日付から導出）
pub async fn search_borrowings(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<BorrowingSearchRequest>,
) -> Result<Json<Vec<BorrowingListItem>>, ApiError> {
    let status = parse_filter::<BorrowingFilter>(req.status.as_deref())?;
    validate_records(&req.records)?;
    let ctx = state.filter_context(req.as_of);
    let query = SearchQuery::new(req.term, status);

    let items = query
        .apply(req.records, &ctx)
        .into_iter()
        .map(|borrowing| BorrowingListItem {
            display_status: derive_status(&borrowing, ctx.now, ctx.boundary),
            borrowing,
        })
        .collect();

    Ok(Json(items))
}

/// POST /borrowings/overdue - 延滞中の貸出を延滞日数の多い順に返す
pub async fn overdue_borrowings(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<OverdueRequest>,
) -> Result<Json<Vec<OverdueNotice>>, ApiError> {
    validate_records(&req.records)?;
    let now = state.now(req.as_of);
    Ok(Json(detect_overdue_borrowings(
        &req.records,
        now,
        &state.config.policy(),
    )))
}

/// POST /reservations/search - 検索語とステータスで予約一覧を絞り込む
pub async fn search_reservations(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ReservationSearchRequest>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let status = parse_filter::<ReservationStatus>(req.status.as_deref())?;
    let ctx = state.filter_context(None);
    let query = SearchQuery::new(req.term, status);

    Ok(Json(query.apply(req.records, &ctx)))
}

/// 受け取った貸出記録は最初の不正な1件でまとめて拒否する
fn validate_records(records: &[Borrowing]) -> Result<(), ApiError> {
    for record in records {
        record.validate().inspect_err(|err| {
            tracing::debug!(borrowing_id = record.id.as_str(), "invalid borrowing record: {}", err);
        })?;
    }
    Ok(())
}

/// 空文字列は「条件なし」として扱う
fn parse_filter<F>(raw: Option<&str>) -> Result<Option<F>, ApiError>
where
    F: std::str::FromStr<Err = String>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<F>().map(Some).map_err(ApiError::BadRequest),
    }
}
