pub mod attendance;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod progress;
pub mod submissions;
pub mod users;

pub use common::modal::ModalState;
pub use common::pagination::{HistoryPaging, PaginationInfo};
