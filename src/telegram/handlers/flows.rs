//! Routes in-flow messages through the state machines and renders replies

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html::escape;

use super::commands::lang_of;
use super::types::{HandlerDeps, HandlerError};
use crate::core::config;
use crate::core::payment_link;
use crate::core::validation::AmountLimits;
use crate::flow::{self, FlowEvent, FlowKind, Reply};
use crate::i18n;
use crate::review::ReviewRequest;
use crate::telegram::notifications::{send_photo_or_text, submit_review_request};

/// Applies one inbound message to the sender's session and sends the reply.
pub async fn handle_flow_message(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    let user_id = msg.chat.id.0;
    let Some(session) = deps.sessions.get(user_id) else {
        return Ok(());
    };
    let Some(event) = event_from_message(&msg) else {
        return Ok(());
    };

    let transition = flow::advance(&session, &event, &deps.limits);

    if let Some((name, value)) = transition.record {
        log::info!("User {} provided {} for {} intake", user_id, name, session.kind.as_str());
        deps.sessions.update_field(user_id, name, value);
    }
    if let Some(step) = transition.next_step {
        deps.sessions.set_step(user_id, step);
    }

    let lang = lang_of(&msg);
    match transition.reply {
        Reply::AmountPrompt { limits } => {
            let key = match session.kind {
                FlowKind::Deposit => "deposit-amount-prompt",
                FlowKind::Withdraw => "withdraw-amount-prompt",
            };
            bot.send_message(msg.chat.id, i18n::t_args(&lang, key, &limit_args(limits)))
                .parse_mode(ParseMode::Html)
                .await?;
        }

        Reply::AmountInvalid { error, limits } => {
            log::warn!(
                "User {} entered invalid {} amount: {:?} ({})",
                user_id,
                session.kind.as_str(),
                msg.text().unwrap_or_default(),
                error
            );
            let key = match session.kind {
                FlowKind::Deposit => "deposit-amount-invalid",
                FlowKind::Withdraw => "withdraw-amount-invalid",
            };
            bot.send_message(msg.chat.id, i18n::t_args(&lang, key, &limit_args(limits)))
                .parse_mode(ParseMode::Html)
                .await?;
        }

        Reply::PaymentRequisites { payment_url } => {
            let mut args = FluentArgs::new();
            args.set("phone", payment_link::PAYMENT_PHONE);
            args.set("link", payment_url);
            send_photo_or_text(
                &bot,
                msg.chat.id,
                config::assets::MBANK_QR_IMG,
                &i18n::t_args(&lang, "deposit-requisites", &args),
            )
            .await?;
            bot.send_message(msg.chat.id, i18n::t(&lang, "deposit-receipt-prompt"))
                .parse_mode(ParseMode::Html)
                .await?;
        }

        Reply::ReceiptReprompt => {
            bot.send_message(msg.chat.id, i18n::t(&lang, "deposit-receipt-reprompt"))
                .parse_mode(ParseMode::Html)
                .await?;
        }

        Reply::RequisitesPrompt => {
            bot.send_message(msg.chat.id, i18n::t(&lang, "withdraw-requisites-prompt"))
                .parse_mode(ParseMode::Html)
                .await?;
        }

        Reply::WithdrawInstruction => {
            let mut args = FluentArgs::new();
            args.set("support", escape(&config::SUPPORT_CONTACT));
            bot.send_message(msg.chat.id, i18n::t_args(&lang, "withdraw-instruction", &args))
                .parse_mode(ParseMode::Html)
                .await?;
            bot.send_message(msg.chat.id, i18n::t(&lang, "withdraw-code-prompt"))
                .parse_mode(ParseMode::Html)
                .await?;
        }

        Reply::Completed { fields } => {
            deps.sessions.clear(user_id);
            let request = ReviewRequest {
                user_id,
                display_name: display_name(&msg),
                kind: session.kind,
                fields,
            };
            submit_review_request(&bot, &request).await?;

            let mut args = FluentArgs::new();
            args.set("support", escape(&config::SUPPORT_CONTACT));
            bot.send_message(msg.chat.id, i18n::t_args(&lang, "request-submitted", &args))
                .parse_mode(ParseMode::Html)
                .await?;
            log::info!("User {} submitted a {} request", user_id, session.kind.as_str());
        }

        Reply::Ignored => {
            log::debug!(
                "Ignoring message from user {} at step {:?} of {} intake",
                user_id,
                session.step,
                session.kind.as_str()
            );
        }
    }

    Ok(())
}

/// Reduces a Telegram message to a flow event. Messages without text or a
/// photo (stickers, voice, …) carry nothing the flows can use.
fn event_from_message(msg: &Message) -> Option<FlowEvent> {
    if let Some(text) = msg.text() {
        return Some(FlowEvent::Text(text.to_string()));
    }
    if let Some(sizes) = msg.photo() {
        // Telegram sorts photo sizes ascending; keep the largest for review.
        return sizes.last().map(|photo| FlowEvent::Photo {
            file_id: photo.file.id.0.clone(),
        });
    }
    None
}

fn limit_args(limits: AmountLimits) -> FluentArgs<'static> {
    let mut args = FluentArgs::new();
    args.set("min", limits.min.to_string());
    args.set("max", limits.max.to_string());
    args
}

fn display_name(msg: &Message) -> String {
    msg.from
        .as_ref()
        .map(|user| match &user.username {
            Some(username) => format!("@{}", username),
            None => user.full_name(),
        })
        .unwrap_or_else(|| msg.chat.id.to_string())
}
