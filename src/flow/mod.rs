//! Conversation state machines for the two intake flows
//!
//! Transitions are pure: [`advance`] maps the current session and one inbound
//! event to the next step, an optional recorded field, and the reply to
//! render. Handlers apply the result to the session store and the chat, which
//! keeps every transition inspectable without a Telegram connection.

pub mod deposit;
pub mod session;
pub mod withdraw;

pub use session::{InMemorySessions, Session, SessionStore};

use std::collections::HashMap;

use crate::core::validation::{AmountError, AmountLimits};

/// Which intake flow a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    Deposit,
    Withdraw,
}

impl FlowKind {
    /// Lowercase name for logs and tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            FlowKind::Deposit => "deposit",
            FlowKind::Withdraw => "withdraw",
        }
    }
}

/// Position inside a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitingAccount,
    AwaitingAmount,
    /// Deposit only
    AwaitingReceipt,
    /// Withdraw only
    AwaitingRequisites,
    /// Withdraw only
    AwaitingCode,
}

/// Names of the collected fields.
pub mod field {
    pub const ACCOUNT: &str = "account";
    pub const AMOUNT: &str = "amount";
    pub const RECEIPT: &str = "receipt";
    pub const REQUISITES: &str = "requisites";
    pub const CODE: &str = "code";
}

/// An inbound user message, reduced to what the state machines care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    Text(String),
    Photo { file_id: String },
}

/// What the handler should send back after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Ask for the amount within the flow's bounds.
    AmountPrompt { limits: AmountLimits },

    /// Amount rejected; the step stays unchanged.
    AmountInvalid { error: AmountError, limits: AmountLimits },

    /// Deposit: payment requisites plus the receipt photo prompt.
    PaymentRequisites { payment_url: String },

    /// Deposit: non-photo input arrived while a receipt is expected.
    ReceiptReprompt,

    /// Withdraw: ask for the payout destination details.
    RequisitesPrompt,

    /// Withdraw: payout instruction plus the code prompt.
    WithdrawInstruction,

    /// Flow finished; forward the collected fields for admin review.
    Completed { fields: HashMap<&'static str, String> },

    /// Input the current step has no use for; dropped after logging.
    Ignored,
}

/// Outcome of feeding one event into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Step to move the session to, if it changes.
    pub next_step: Option<Step>,
    /// Field collected by this event, if any.
    pub record: Option<(&'static str, String)>,
    pub reply: Reply,
}

impl Transition {
    /// Transition that leaves the session untouched.
    pub(crate) fn stay(reply: Reply) -> Self {
        Self {
            next_step: None,
            record: None,
            reply,
        }
    }
}

/// Per-flow amount bounds, resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct FlowLimits {
    pub deposit: AmountLimits,
    pub withdraw: AmountLimits,
}

/// Routes an event through the session's state machine.
pub fn advance(session: &Session, event: &FlowEvent, limits: &FlowLimits) -> Transition {
    match session.kind {
        FlowKind::Deposit => deposit::advance(session, event, limits.deposit),
        FlowKind::Withdraw => withdraw::advance(session, event, limits.withdraw),
    }
}
