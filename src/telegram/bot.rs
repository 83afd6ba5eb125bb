//! Bot initialization and command registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::core::config;
use crate::i18n;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Я умею:")]
pub enum Command {
    #[command(description = "главное меню и приветствие")]
    Start,
    #[command(description = "пополнить счёт")]
    Replenish,
    #[command(description = "вывести средства")]
    Withdraw,
    #[command(description = "отменить текущее действие")]
    Cancel,
    #[command(description = "вернуться в главное меню")]
    Menu,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Errors
/// Returns an error if the HTTP client cannot be built or BOT_API_URL is not
/// a valid URL.
pub fn create_bot() -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(config::BOT_TOKEN.clone(), client);

    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Registers the command menu for every supported language.
///
/// The default (no language code) registration uses the fallback locale so
/// users with unsupported client languages still see a menu.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(commands_for(&i18n::default_lang())).await?;

    for &code in i18n::SUPPORTED_LANGS {
        let lang = i18n::lang_from_code(Some(code));
        bot.set_my_commands(commands_for(&lang))
            .language_code(code.to_string())
            .await?;
    }

    Ok(())
}

fn commands_for(lang: &unic_langid::LanguageIdentifier) -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", i18n::t(lang, "cmd-start")),
        BotCommand::new("replenish", i18n::t(lang, "cmd-replenish")),
        BotCommand::new("withdraw", i18n::t(lang, "cmd-withdraw")),
        BotCommand::new("cancel", i18n::t(lang, "cmd-cancel")),
        BotCommand::new("menu", i18n::t(lang, "cmd-menu")),
    ]
}
