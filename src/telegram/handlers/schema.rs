//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::callbacks::handle_decision_callback;
use super::commands::{handle_cancel, handle_deposit_entry, handle_menu, handle_start, handle_withdraw_entry};
use super::flows::handle_flow_message;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::keyboards;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Branch order matters: commands and menu buttons outrank the in-flow
/// handler, which is what lets `/cancel` interrupt any step.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_buttons = deps.clone();
    let deps_flow = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(menu_button_handler(deps_buttons))
        .branch(flow_message_handler(deps_flow))
        .branch(decision_callback_handler())
}

/// Handler for bot commands (/start, /replenish, /withdraw, /cancel, /menu)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command {:?} from chat {}", cmd, msg.chat.id);
                match cmd {
                    Command::Start => handle_start(&bot, &msg).await?,
                    Command::Replenish => handle_deposit_entry(&bot, &msg, &deps).await?,
                    Command::Withdraw => handle_withdraw_entry(&bot, &msg, &deps).await?,
                    Command::Cancel => handle_cancel(&bot, &msg, &deps).await?,
                    Command::Menu => handle_menu(&bot, &msg, &deps).await?,
                }
                Ok(())
            }
        },
    ))
}

/// Handler for reply-keyboard button presses (plain text in any locale)
fn menu_button_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().map(is_menu_button).unwrap_or(false))
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let text = msg.text().unwrap_or_default();
                if keyboards::matches_button(text, "button-deposit") {
                    handle_deposit_entry(&bot, &msg, &deps).await?;
                } else if keyboards::matches_button(text, "button-withdraw") {
                    handle_withdraw_entry(&bot, &msg, &deps).await?;
                } else if keyboards::matches_button(text, "button-cancel") {
                    handle_cancel(&bot, &msg, &deps).await?;
                } else if keyboards::matches_button(text, "button-menu") {
                    handle_menu(&bot, &msg, &deps).await?;
                }
                Ok(())
            }
        })
}

fn is_menu_button(text: &str) -> bool {
    ["button-deposit", "button-withdraw", "button-cancel", "button-menu"]
        .iter()
        .any(|key| keyboards::matches_button(text, key))
}

/// Handler for messages addressed to an active intake session
fn flow_message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let sessions = deps.sessions.clone();
    Update::filter_message()
        .filter(move |msg: Message| sessions.get(msg.chat.id.0).is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_flow_message(bot, msg, deps).await }
        })
}

/// Handler for admin approve/decline callback queries
fn decision_callback_handler() -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(|bot: Bot, q: CallbackQuery| async move {
        handle_decision_callback(bot, q).await
    })
}
