pub mod dates;
pub mod modal;
pub mod numeric;
pub mod pagination;
pub mod response;
