pub mod borrowing;
pub mod commands;
pub mod dates;
pub mod directory;
pub mod due_date;
pub mod errors;
pub mod events;
pub mod fees;
pub mod policy;
pub mod reservation;
pub mod status;
pub mod value_objects;

pub use borrowing::{Borrowing, BorrowingStatus, NewBorrowing};
pub use errors::*;
pub use events::*;
pub use policy::*;
pub use status::DisplayStatus;
pub use value_objects::*;
