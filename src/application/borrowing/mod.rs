mod borrow_draft;
mod overdue_detection;
mod return_draft;

pub use borrow_draft::BorrowDraft;
pub use overdue_detection::{OverdueNotice, detect_overdue_borrowings};
pub use return_draft::{FeeNotice, ReturnDraft};
