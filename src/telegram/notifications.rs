//! Outbound messages: review requests to the administrator, decision notices
//! to users, photo prompts with text fallback

use std::path::Path;

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, ParseMode};
use teloxide::utils::html::escape;

use crate::core::config;
use crate::core::error::AppResult;
use crate::flow::{field, FlowKind};
use crate::i18n;
use crate::review::{ReviewRequest, Verdict};
use crate::telegram::keyboards;

/// Sends a photo with an HTML caption, falling back to text-only when the
/// asset is missing from disk.
pub async fn send_photo_or_text(bot: &Bot, chat_id: ChatId, asset_path: &str, text: &str) -> AppResult<()> {
    if Path::new(asset_path).exists() {
        bot.send_photo(chat_id, InputFile::file(asset_path))
            .caption(text)
            .parse_mode(ParseMode::Html)
            .await?;
    } else {
        log::warn!("Image {} not found, sending text-only prompt", asset_path);
        bot.send_message(chat_id, text).parse_mode(ParseMode::Html).await?;
    }
    Ok(())
}

/// Forwards a completed intake to the administrator with approve/decline
/// controls attached.
///
/// Deposit requests ride as the caption of the receipt photo so the admin
/// sees the evidence and the data in one message; withdraw requests are plain
/// text. Either way that message becomes the durable record of the request.
pub async fn submit_review_request(bot: &Bot, request: &ReviewRequest) -> AppResult<()> {
    let admin = ChatId(*config::ADMIN_CHAT_ID);
    let keyboard = keyboards::review_keyboard(request);
    let text = admin_request_text(request);

    match request.receipt_file_id() {
        Some(file_id) => {
            bot.send_photo(admin, InputFile::file_id(FileId(file_id.to_string())))
                .caption(text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }
        None => {
            bot.send_message(admin, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }
    }

    log::info!(
        "Forwarded {} request from user {} to admin",
        request.kind.as_str(),
        request.user_id
    );
    Ok(())
}

/// Renders the admin-facing request body in the default locale.
fn admin_request_text(request: &ReviewRequest) -> String {
    let lang = i18n::default_lang();
    let mut args = FluentArgs::new();
    args.set("user", escape(&request.display_name));
    args.set("id", request.user_id.to_string());
    args.set("account", escape(request.field(field::ACCOUNT)));
    args.set("amount", escape(request.field(field::AMOUNT)));

    match request.kind {
        FlowKind::Deposit => i18n::t_args(&lang, "admin-deposit-request", &args),
        FlowKind::Withdraw => {
            args.set("code", escape(request.field(field::CODE)));
            args.set("requisites", escape(request.field(field::REQUISITES)));
            i18n::t_args(&lang, "admin-withdraw-request", &args)
        }
    }
}

/// Tells a user how their request was decided.
///
/// The result is the caller's signal: on failure the request stays
/// unresolved so the admin can retry after the user unblocks the bot.
pub async fn notify_user_decision(
    bot: &Bot,
    user_id: i64,
    kind: FlowKind,
    verdict: Verdict,
) -> Result<(), teloxide::RequestError> {
    let key = match (kind, verdict) {
        (FlowKind::Deposit, Verdict::Approve) => "user-deposit-approved",
        (FlowKind::Deposit, Verdict::Decline) => "user-deposit-declined",
        (FlowKind::Withdraw, Verdict::Approve) => "user-withdraw-approved",
        (FlowKind::Withdraw, Verdict::Decline) => "user-withdraw-declined",
    };

    bot.send_message(ChatId(user_id), i18n::t(&i18n::default_lang(), key))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// One-line startup notice so the admin knows the bot restarted.
pub async fn notify_admin_startup(bot: &Bot) {
    let admin = ChatId(*config::ADMIN_CHAT_ID);
    let text = i18n::t(&i18n::default_lang(), "admin-startup");
    if let Err(e) = bot.send_message(admin, text).await {
        log::warn!("Failed to notify admin about startup: {}", e);
    }
}
