//! Command and menu-button endpoints

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html::escape;
use unic_langid::LanguageIdentifier;

use super::types::{HandlerDeps, HandlerError};
use crate::core::config;
use crate::flow::FlowKind;
use crate::i18n;
use crate::telegram::keyboards;
use crate::telegram::notifications::send_photo_or_text;

/// Language of the message sender, from the Telegram profile locale.
pub(crate) fn lang_of(msg: &Message) -> LanguageIdentifier {
    i18n::lang_from_code(msg.from.as_ref().and_then(|u| u.language_code.as_deref()))
}

fn support_args() -> FluentArgs<'static> {
    let mut args = FluentArgs::new();
    args.set("support", escape(&config::SUPPORT_CONTACT));
    args
}

/// `/start`: greeting plus the main menu keyboard. Does not touch an active
/// session; only cancel and menu-return clear state.
pub async fn handle_start(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    log::info!("User {} started the bot", msg.chat.id);
    let lang = lang_of(msg);

    bot.send_message(msg.chat.id, i18n::t_args(&lang, "welcome", &support_args()))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu(&lang))
        .await?;
    Ok(())
}

/// `/cancel`: drops the session and confirms.
pub async fn handle_cancel(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    log::info!("User {} canceled an action", msg.chat.id);
    deps.sessions.clear(msg.chat.id.0);

    let lang = lang_of(msg);
    bot.send_message(msg.chat.id, i18n::t(&lang, "cancelled"))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu(&lang))
        .await?;
    Ok(())
}

/// `/menu`: drops the session and shows the main menu.
pub async fn handle_menu(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    log::info!("User {} returned to main menu", msg.chat.id);
    deps.sessions.clear(msg.chat.id.0);

    let lang = lang_of(msg);
    bot.send_message(msg.chat.id, i18n::t_args(&lang, "main-menu", &support_args()))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu(&lang))
        .await?;
    Ok(())
}

/// `/replenish` or the deposit button: opens a deposit session and asks for
/// the target account. Any previous session is discarded.
pub async fn handle_deposit_entry(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    log::info!("User {} started deposit intake", msg.chat.id);
    deps.sessions.start(msg.chat.id.0, FlowKind::Deposit);

    let lang = lang_of(msg);
    send_photo_or_text(
        bot,
        msg.chat.id,
        config::assets::LOGIN_IMG,
        &i18n::t(&lang, "deposit-account-prompt"),
    )
    .await?;
    Ok(())
}

/// `/withdraw` or the withdraw button: opens a withdraw session and asks for
/// the source account.
pub async fn handle_withdraw_entry(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    log::info!("User {} started withdraw intake", msg.chat.id);
    deps.sessions.start(msg.chat.id.0, FlowKind::Withdraw);

    let lang = lang_of(msg);
    send_photo_or_text(
        bot,
        msg.chat.id,
        config::assets::LOGIN_IMG,
        &i18n::t(&lang, "withdraw-account-prompt"),
    )
    .await?;
    Ok(())
}
