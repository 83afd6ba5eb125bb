//! Reply and inline keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};
use unic_langid::LanguageIdentifier;

use crate::i18n;
use crate::review::ReviewRequest;

/// Main menu reply keyboard: deposit / withdraw on top, cancel / home below.
pub fn main_menu(lang: &LanguageIdentifier) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(i18n::t(lang, "button-deposit")),
            KeyboardButton::new(i18n::t(lang, "button-withdraw")),
        ],
        vec![
            KeyboardButton::new(i18n::t(lang, "button-cancel")),
            KeyboardButton::new(i18n::t(lang, "button-menu")),
        ],
    ])
    .resize_keyboard()
}

/// True when `text` equals the given button label in any supported locale.
///
/// Reply-keyboard presses arrive as plain text, so routing has to compare
/// against every locale's label, not just the sender's.
pub fn matches_button(text: &str, key: &str) -> bool {
    i18n::SUPPORTED_LANGS.iter().any(|&code| {
        let lang = i18n::lang_from_code(Some(code));
        i18n::t(&lang, key) == text
    })
}

/// Approve/decline controls tagged with the originating user's id.
pub fn review_keyboard(request: &ReviewRequest) -> InlineKeyboardMarkup {
    let lang = i18n::default_lang();
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(i18n::t(&lang, "button-approve"), request.approve_token()),
        InlineKeyboardButton::callback(i18n::t(&lang, "button-decline"), request.decline_token()),
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowKind;
    use std::collections::HashMap;

    #[test]
    fn test_main_menu_has_four_buttons() {
        let markup = main_menu(&i18n::default_lang());
        let total: usize = markup.keyboard.iter().map(Vec::len).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_menu_buttons_match_in_every_locale() {
        for &code in i18n::SUPPORTED_LANGS {
            let lang = i18n::lang_from_code(Some(code));
            for key in ["button-deposit", "button-withdraw", "button-cancel", "button-menu"] {
                let label = i18n::t(&lang, key);
                assert!(matches_button(&label, key), "{} label not matched for {}", key, code);
            }
        }
    }

    #[test]
    fn test_unrelated_text_is_not_a_button() {
        assert!(!matches_button("hello", "button-deposit"));
        assert!(!matches_button("", "button-cancel"));
    }

    #[test]
    fn test_review_keyboard_carries_decision_tokens() {
        let request = ReviewRequest {
            user_id: 42,
            display_name: "@someone".to_string(),
            kind: FlowKind::Deposit,
            fields: HashMap::new(),
        };
        let markup = review_keyboard(&request);

        assert_eq!(markup.inline_keyboard.len(), 1);
        let row = &markup.inline_keyboard[0];
        assert_eq!(row.len(), 2);

        let datas: Vec<String> = row
            .iter()
            .filter_map(|button| match &button.kind {
                teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(datas, vec!["approve_deposit:42".to_string(), "decline_deposit:42".to_string()]);
    }
}
