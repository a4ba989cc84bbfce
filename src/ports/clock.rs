use chrono::{DateTime, Utc};

/// 時計ポート
///
/// 「現在時刻」を暗黙のグローバル状態にせず、呼び出し側へ注入する。
/// 延滞判定はこの値を引数として純粋関数に渡す。
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
