use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::core::error::AppError;
use crate::core::validation::AmountLimits;

/// Configuration constants for the bot
/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Administrator chat id, the single recipient of review requests
/// Read from ADMIN_ID environment variable
pub static ADMIN_CHAT_ID: Lazy<i64> =
    Lazy::new(|| env::var("ADMIN_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(0));

/// Support contact handle shown in user-facing messages
/// Read from SUPPORT environment variable
/// Example: @example_support
pub static SUPPORT_CONTACT: Lazy<String> = Lazy::new(|| env::var("SUPPORT").unwrap_or_else(|_| String::new()));

/// Custom Bot API server URL, if any
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: cashdesk.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "cashdesk.log".to_string()));

/// Deposit bounds configuration
pub mod deposit {
    use super::*;

    /// Minimum accepted top-up amount in som
    /// Read from MIN_AMOUNT environment variable
    pub static MIN_AMOUNT: Lazy<u64> =
        Lazy::new(|| env::var("MIN_AMOUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(0));

    /// Maximum accepted top-up amount in som
    /// Read from MAX_AMOUNT environment variable
    pub static MAX_AMOUNT: Lazy<u64> =
        Lazy::new(|| env::var("MAX_AMOUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(0));

    /// Bounds the deposit amount validator runs against.
    pub fn limits() -> AmountLimits {
        AmountLimits {
            min: *MIN_AMOUNT,
            max: *MAX_AMOUNT,
        }
    }
}

/// Withdraw bounds configuration
///
/// Payout policy range. Intentionally independent of the configured deposit
/// bounds: payouts are settled in cash at the operator's side and the cash
/// desk only handles 50–45000 som per request.
pub mod withdraw {
    use super::AmountLimits;

    pub const MIN_AMOUNT: u64 = 50;
    pub const MAX_AMOUNT: u64 = 45_000;

    /// Bounds the withdraw amount validator runs against.
    pub const fn limits() -> AmountLimits {
        AmountLimits {
            min: MIN_AMOUNT,
            max: MAX_AMOUNT,
        }
    }
}

/// Static image assets attached to prompts
///
/// Both are optional: a missing file degrades the prompt to text-only.
pub mod assets {
    /// Illustration attached to the account prompts
    pub const LOGIN_IMG: &str = "img/login_img.jpg";

    /// Merchant QR code attached to the payment requisites message
    pub const MBANK_QR_IMG: &str = "img/qr_codes/mbank_qr.jpg";
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Retry configuration
pub mod retry {
    /// Maximum number of retries for dispatcher reconnection
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Base for exponential backoff calculation
    pub const EXPONENTIAL_BACKOFF_BASE: u64 = 2;
}

/// Validates the required configuration at process start.
///
/// Reads the environment directly (not the cached statics) and reports every
/// missing or malformed variable at once. This is the only fatal error path
/// in the application.
pub fn validate() -> Result<(), AppError> {
    let mut problems: Vec<String> = Vec::new();

    if env::var("BOT_TOKEN").or_else(|_| env::var("TELOXIDE_TOKEN")).map(|v| v.is_empty()).unwrap_or(true) {
        problems.push("BOT_TOKEN (or TELOXIDE_TOKEN) is not set".to_string());
    }

    match env::var("ADMIN_ID") {
        Ok(v) if v.parse::<i64>().is_ok() => {}
        Ok(v) => problems.push(format!("ADMIN_ID is not a valid chat id: {:?}", v)),
        Err(_) => problems.push("ADMIN_ID is not set".to_string()),
    }

    if env::var("SUPPORT").map(|v| v.is_empty()).unwrap_or(true) {
        problems.push("SUPPORT is not set".to_string());
    }

    let min = match env::var("MIN_AMOUNT") {
        Ok(v) => match v.parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) => {
                problems.push(format!("MIN_AMOUNT is not a valid amount: {:?}", v));
                None
            }
        },
        Err(_) => {
            problems.push("MIN_AMOUNT is not set".to_string());
            None
        }
    };
    let max = match env::var("MAX_AMOUNT") {
        Ok(v) => match v.parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) => {
                problems.push(format!("MAX_AMOUNT is not a valid amount: {:?}", v));
                None
            }
        },
        Err(_) => {
            problems.push("MAX_AMOUNT is not set".to_string());
            None
        }
    };
    if let (Some(min), Some(max)) = (min, max) {
        if min == 0 || min > max {
            problems.push(format!("MIN_AMOUNT..MAX_AMOUNT is not a valid range: {}..{}", min, max));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(problems.join("; ")))
    }
}
