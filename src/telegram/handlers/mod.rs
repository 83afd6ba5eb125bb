//! Dispatcher endpoints grouped by update type

pub mod callbacks;
pub mod commands;
pub mod flows;
pub mod schema;
pub mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
