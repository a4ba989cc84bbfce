pub mod borrowing;
pub mod search;
