//! Admin decision callbacks: approve/decline with exactly-once resolution

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::types::{MaybeInaccessibleMessage, ParseMode};
use teloxide::utils::html::escape;

use super::types::HandlerError;
use crate::i18n;
use crate::review::{self, Verdict};
use crate::telegram::notifications::notify_user_decision;

/// Processes an inline approve/decline press on an admin review message.
pub async fn handle_decision_callback(bot: Bot, q: CallbackQuery) -> Result<(), HandlerError> {
    let callback_id = q.id.clone();
    let lang = i18n::default_lang();

    let Some(decision) = q.data.as_deref().and_then(review::parse_decision) else {
        log::warn!("Unrecognized callback payload: {:?}", q.data);
        bot.answer_callback_query(callback_id).await?;
        return Ok(());
    };

    let Some(MaybeInaccessibleMessage::Regular(message)) = q.message.as_ref() else {
        log::warn!("Decision callback for user {} without an accessible message", decision.user_id);
        bot.answer_callback_query(callback_id).await?;
        return Ok(());
    };

    // Deposit requests live in a photo caption, withdraw requests in plain
    // text; either one is the durable record.
    let body = message.caption().or_else(|| message.text()).unwrap_or_default();

    // Idempotence guard: a marker in the message means the request is settled.
    if review::resolution_of(body).is_some() {
        log::info!(
            "Duplicate {} decision for user {} ignored",
            decision.kind.as_str(),
            decision.user_id
        );
        bot.answer_callback_query(callback_id)
            .text(i18n::t(&lang, "callback-already-processed"))
            .show_alert(true)
            .await?;
        return Ok(());
    }

    log::info!(
        "Admin {} {} request of user {}",
        match decision.verdict {
            Verdict::Approve => "approved",
            Verdict::Decline => "declined",
        },
        decision.kind.as_str(),
        decision.user_id
    );

    // Notify the user first; only a delivered notice may mark the request.
    if let Err(e) = notify_user_decision(&bot, decision.user_id, decision.kind, decision.verdict).await {
        log::error!(
            "Failed to notify user {} about {} decision: {}",
            decision.user_id,
            decision.kind.as_str(),
            e
        );
        let mut args = FluentArgs::new();
        args.set("error", e.to_string());
        bot.answer_callback_query(callback_id)
            .text(i18n::t_args(&lang, "callback-delivery-failed", &args))
            .show_alert(true)
            .await?;
        return Ok(());
    }

    // Append the marker and drop the keyboard so the message cannot be acted
    // on again. The original body arrives as plain text, so it is re-escaped
    // before going back through the HTML parser.
    let resolved = format!("{}{}", escape(body), review::marker_line(decision.verdict));
    let edit_result = if message.caption().is_some() {
        bot.edit_message_caption(message.chat.id, message.id)
            .caption(resolved)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
    } else {
        bot.edit_message_text(message.chat.id, message.id, resolved)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
    };
    if let Err(e) = edit_result {
        // The user already got their notice; a retry by the admin re-sends it.
        log::error!("Failed to mark admin message for user {}: {}", decision.user_id, e);
    }

    let ack_key = match decision.verdict {
        Verdict::Approve => "callback-approved",
        Verdict::Decline => "callback-declined",
    };
    bot.answer_callback_query(callback_id).text(i18n::t(&lang, ack_key)).await?;

    Ok(())
}
