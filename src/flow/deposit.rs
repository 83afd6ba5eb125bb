//! Deposit intake: account → amount → receipt photo → admin review

use super::{field, FlowEvent, Reply, Session, Step, Transition};
use crate::core::payment_link;
use crate::core::validation::{validate_amount, AmountLimits};

/// Advances a deposit session by one event.
pub fn advance(session: &Session, event: &FlowEvent, limits: AmountLimits) -> Transition {
    match (session.step, event) {
        (Step::AwaitingAccount, FlowEvent::Text(text)) if !text.is_empty() => Transition {
            next_step: Some(Step::AwaitingAmount),
            record: Some((field::ACCOUNT, text.clone())),
            reply: Reply::AmountPrompt { limits },
        },

        (Step::AwaitingAmount, FlowEvent::Text(text)) => match validate_amount(text, limits) {
            Ok(amount) => Transition {
                next_step: Some(Step::AwaitingReceipt),
                record: Some((field::AMOUNT, amount.to_string())),
                reply: Reply::PaymentRequisites {
                    payment_url: payment_link::mbank_payment_url(amount),
                },
            },
            Err(error) => Transition::stay(Reply::AmountInvalid { error, limits }),
        },

        (Step::AwaitingReceipt, FlowEvent::Photo { file_id }) => {
            let mut fields = session.fields.clone();
            fields.insert(field::RECEIPT, file_id.clone());
            Transition {
                next_step: None,
                record: None,
                reply: Reply::Completed { fields },
            }
        }

        // Text while a receipt is expected: ask again instead of dropping it.
        (Step::AwaitingReceipt, FlowEvent::Text(_)) => Transition::stay(Reply::ReceiptReprompt),

        _ => Transition::stay(Reply::Ignored),
    }
}
