//! Cashdesk: Telegram bot for manual deposit/withdraw order intake
//!
//! Users walk through short linear conversations (deposit: account → amount →
//! receipt photo; withdraw: account → amount → requisites → code). Completed
//! requests land in the administrator's chat with inline approve/decline
//! controls; the admin message itself is the durable record of the request.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, validation, payment link
//! - `flow`: session store and the two intake state machines
//! - `review`: decision tokens and exactly-once resolution
//! - `telegram`: bot wiring, dispatcher schema, keyboards, notifications
//! - `i18n`: fluent-backed message catalog (ru default, en)

pub mod core;
pub mod flow;
pub mod i18n;
pub mod review;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError};
pub use flow::{FlowKind, FlowLimits, InMemorySessions, SessionStore};
pub use telegram::{create_bot, schema, HandlerDeps};
