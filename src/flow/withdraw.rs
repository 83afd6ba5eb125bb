//! Withdraw intake: account → amount → requisites → confirmation code → admin review

use super::{field, FlowEvent, Reply, Session, Step, Transition};
use crate::core::validation::{validate_amount, AmountLimits};

/// Advances a withdraw session by one event.
pub fn advance(session: &Session, event: &FlowEvent, limits: AmountLimits) -> Transition {
    match (session.step, event) {
        (Step::AwaitingAccount, FlowEvent::Text(text)) if !text.is_empty() => Transition {
            next_step: Some(Step::AwaitingAmount),
            record: Some((field::ACCOUNT, text.clone())),
            reply: Reply::AmountPrompt { limits },
        },

        (Step::AwaitingAmount, FlowEvent::Text(text)) => match validate_amount(text, limits) {
            Ok(amount) => Transition {
                next_step: Some(Step::AwaitingRequisites),
                record: Some((field::AMOUNT, amount.to_string())),
                reply: Reply::RequisitesPrompt,
            },
            Err(error) => Transition::stay(Reply::AmountInvalid { error, limits }),
        },

        (Step::AwaitingRequisites, FlowEvent::Text(text)) if !text.is_empty() => Transition {
            next_step: Some(Step::AwaitingCode),
            record: Some((field::REQUISITES, text.clone())),
            reply: Reply::WithdrawInstruction,
        },

        // The code is forwarded verbatim; its format is the operator's business.
        (Step::AwaitingCode, FlowEvent::Text(text)) if !text.is_empty() => {
            let mut fields = session.fields.clone();
            fields.insert(field::CODE, text.clone());
            Transition {
                next_step: None,
                record: None,
                reply: Reply::Completed { fields },
            }
        }

        _ => Transition::stay(Reply::Ignored),
    }
}
