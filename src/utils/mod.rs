pub mod busy;
pub mod file_kind;
pub mod selection;
pub mod tiers;
pub mod validate;

pub use busy::{BusyFlag, BusyGuard};
pub use file_kind::{classify, file_extension};
pub use selection::{SelectionScope, SelectionTicket};
pub use tiers::{AttendanceTier, GradeColor, RateColor, grade_percentage, percentage};
