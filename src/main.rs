use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;
use tokio::time::sleep;

use cashdesk::core::{config, init_logger};
use cashdesk::flow::{FlowLimits, InMemorySessions};
use cashdesk::telegram::notifications::notify_admin_startup;
use cashdesk::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, bot
/// creation). Missing required configuration is the only fatal runtime
/// condition.
#[tokio::main]
async fn main() -> Result<()> {
    // Catch panics from the dispatcher so they end up in the log instead of
    // only on a dead stderr.
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    // Fail fast: a bot without a token, admin or deposit bounds cannot take orders.
    config::validate()?;

    run_bot().await
}

/// Run the Telegram bot
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    let bot = create_bot()?;

    let bot_info = bot.get_me().await?;
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username, bot_info.id);

    setup_bot_commands(&bot).await?;
    notify_admin_startup(&bot).await;

    let sessions = Arc::new(InMemorySessions::new());
    let limits = FlowLimits {
        deposit: config::deposit::limits(),
        withdraw: config::withdraw::limits(),
    };
    log::info!(
        "Deposit bounds: {}..{} som, withdraw bounds: {}..{} som",
        limits.deposit.min,
        limits.deposit.max,
        limits.withdraw.min,
        limits.withdraw.max
    );

    let handler = schema(HandlerDeps::new(sessions, limits));

    log::info!("Starting bot in long polling mode");

    // Run the dispatcher in a separate task to isolate panics; reconnect with
    // exponential backoff when the polling transport dies.
    let mut retry_count: u32 = 0;
    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();

        let handle = tokio::spawn(async move {
            Dispatcher::builder(bot_clone, handler_clone)
                .dependencies(DependencyMap::new())
                .enable_ctrlc_handler()
                .build()
                .dispatch()
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                break;
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);

                retry_count += 1;
                if retry_count > config::retry::MAX_DISPATCHER_RETRIES {
                    log::error!("Max retries reached after panic. Exiting...");
                    break;
                }
                log::info!(
                    "Retrying dispatcher connection after panic (attempt {}/{})...",
                    retry_count,
                    config::retry::MAX_DISPATCHER_RETRIES
                );
                sleep(Duration::from_secs(
                    config::retry::EXPONENTIAL_BACKOFF_BASE.pow(retry_count),
                ))
                .await;
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                break;
            }
        }
    }

    Ok(())
}
