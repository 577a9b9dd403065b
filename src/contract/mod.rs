pub mod dispatch;
pub mod error;
pub mod registry;
pub mod reply;
pub mod schema;
pub mod tool;
