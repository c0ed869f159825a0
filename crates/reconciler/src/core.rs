pub mod dispatch;
pub mod errors;
pub mod notification;
pub mod vault;
