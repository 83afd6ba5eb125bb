use std::collections::HashMap;

use fluent_templates::{
    fluent_bundle::{FluentArgs, FluentValue},
    static_loader, Loader,
};
use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "ru",
        // Raw strings only: Unicode isolate marks would corrupt the payment
        // link spliced into an href attribute.
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// Supported language codes; the first one is the fallback.
pub static SUPPORTED_LANGS: &[&str] = &["ru", "en"];

/// Default language identifier used as a fallback.
static DEFAULT_LANG: Lazy<LanguageIdentifier> = Lazy::new(|| "ru".parse().unwrap());

/// Returns the default (admin-facing) language.
pub fn default_lang() -> LanguageIdentifier {
    DEFAULT_LANG.clone()
}

/// Normalizes a Telegram profile language code (e.g. "en-US") into a
/// supported LanguageIdentifier, falling back to the default.
pub fn lang_from_code(code: Option<&str>) -> LanguageIdentifier {
    let Some(code) = code else {
        return DEFAULT_LANG.clone();
    };
    let base = code.split('-').next().unwrap_or(code).to_lowercase();
    if SUPPORTED_LANGS.contains(&base.as_str()) {
        base.parse().unwrap_or_else(|_| DEFAULT_LANG.clone())
    } else {
        DEFAULT_LANG.clone()
    }
}

/// Returns a localized string for the given key.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t(lang: &LanguageIdentifier, key: &str) -> String {
    let text = LOCALES
        .lookup(lang, key)
        .unwrap_or_else(|| LOCALES.lookup(&DEFAULT_LANG, key).unwrap_or_else(|| key.to_string()));
    text.replace("\\n", "\n")
}

/// Returns a localized string with arguments for interpolation.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t_args(lang: &LanguageIdentifier, key: &str, args: &FluentArgs) -> String {
    let args_map: HashMap<String, FluentValue> = args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();

    let text = LOCALES.lookup_with_args(lang, key, &args_map).unwrap_or_else(|| {
        LOCALES
            .lookup_with_args(&DEFAULT_LANG, key, &args_map)
            .unwrap_or_else(|| key.to_string())
    });
    text.replace("\\n", "\n")
}
