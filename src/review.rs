//! Admin review: decision tokens and exactly-once resolution
//!
//! The admin-facing message is the only durable record of a request. Its
//! resolution is recovered from a marker substring appended on approval or
//! decline, which is what makes repeated button presses harmless.

use std::collections::HashMap;
use std::fmt;

use crate::flow::{field, FlowKind};

/// Outcome the admin picked for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approve,
    Decline,
}

/// Resolution state recovered from an admin message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Approved,
    Declined,
}

/// A parsed `<action>:<user_id>` callback token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub kind: FlowKind,
    pub user_id: i64,
}

impl Decision {
    pub fn new(verdict: Verdict, kind: FlowKind, user_id: i64) -> Self {
        Self { verdict, kind, user_id }
    }

    fn action(&self) -> &'static str {
        match (self.verdict, self.kind) {
            (Verdict::Approve, FlowKind::Deposit) => "approve_deposit",
            (Verdict::Decline, FlowKind::Deposit) => "decline_deposit",
            (Verdict::Approve, FlowKind::Withdraw) => "approve_withdraw",
            (Verdict::Decline, FlowKind::Withdraw) => "decline_withdraw",
        }
    }
}

/// Token encoding used as inline button callback data.
impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action(), self.user_id)
    }
}

/// Parses callback data back into a decision.
///
/// Returns `None` for anything that is not a well-formed token; such
/// callbacks are dropped by the handler.
pub fn parse_decision(data: &str) -> Option<Decision> {
    let (action, user_id) = data.split_once(':')?;
    let user_id: i64 = user_id.parse().ok()?;
    let (verdict, kind) = match action {
        "approve_deposit" => (Verdict::Approve, FlowKind::Deposit),
        "decline_deposit" => (Verdict::Decline, FlowKind::Deposit),
        "approve_withdraw" => (Verdict::Approve, FlowKind::Withdraw),
        "decline_withdraw" => (Verdict::Decline, FlowKind::Withdraw),
        _ => return None,
    };
    Some(Decision::new(verdict, kind, user_id))
}

/// Marker substrings embedded in a resolved admin message.
///
/// Matched against the plain message text, so they must stay plain phrases
/// without markup. `marker_line` and `resolution_of` must agree on these.
pub const APPROVED_MARKER: &str = "Заявка подтверждена";
pub const DECLINED_MARKER: &str = "Заявка отклонена";

/// Recovers the resolution embedded in an admin message, if any.
pub fn resolution_of(text: &str) -> Option<Resolution> {
    if text.contains(APPROVED_MARKER) {
        Some(Resolution::Approved)
    } else if text.contains(DECLINED_MARKER) {
        Some(Resolution::Declined)
    } else {
        None
    }
}

/// The HTML line appended to the admin message when a verdict lands.
pub fn marker_line(verdict: Verdict) -> String {
    match verdict {
        Verdict::Approve => format!("\n\n✅ <b>{}.</b>", APPROVED_MARKER),
        Verdict::Decline => format!("\n\n❌ <b>{}.</b>", DECLINED_MARKER),
    }
}

/// A completed intake awaiting the admin's verdict.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    pub user_id: i64,
    /// `@username` when set, otherwise the profile name.
    pub display_name: String,
    pub kind: FlowKind,
    pub fields: HashMap<&'static str, String>,
}

impl ReviewRequest {
    /// Collected field by name; placeholder when the flow never set it.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("—")
    }

    /// File id of the receipt photo (deposit requests only).
    pub fn receipt_file_id(&self) -> Option<&str> {
        self.fields.get(field::RECEIPT).map(String::as_str)
    }

    pub fn approve_token(&self) -> String {
        Decision::new(Verdict::Approve, self.kind, self.user_id).to_string()
    }

    pub fn decline_token(&self) -> String {
        Decision::new(Verdict::Decline, self.kind, self.user_id).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decision_tokens_round_trip() {
        for verdict in [Verdict::Approve, Verdict::Decline] {
            for kind in [FlowKind::Deposit, FlowKind::Withdraw] {
                let decision = Decision::new(verdict, kind, 123456789);
                let token = decision.to_string();
                assert_eq!(parse_decision(&token), Some(decision), "failed for {}", token);
            }
        }
    }

    #[test]
    fn test_token_format_matches_wire_shape() {
        let decision = Decision::new(Verdict::Approve, FlowKind::Deposit, 42);
        assert_eq!(decision.to_string(), "approve_deposit:42");
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        let cases = [
            "",
            "approve_deposit",
            "approve_deposit:",
            "approve_deposit:abc",
            "refund_deposit:42",
            ":42",
            "42:approve_deposit",
        ];
        for data in cases {
            assert_eq!(parse_decision(data), None, "should reject {:?}", data);
        }
    }

    #[test]
    fn test_parse_accepts_negative_chat_ids() {
        // Group chats have negative ids; the token stays parseable.
        assert_eq!(
            parse_decision("decline_withdraw:-100123"),
            Some(Decision::new(Verdict::Decline, FlowKind::Withdraw, -100123))
        );
    }

    #[test]
    fn test_fresh_message_has_no_resolution() {
        assert_eq!(resolution_of("Новая заявка на пополнение"), None);
    }

    #[test]
    fn test_marker_line_is_detected_as_resolution() {
        let body = format!("Новая заявка{}", marker_line(Verdict::Approve));
        assert_eq!(resolution_of(&body), Some(Resolution::Approved));

        let body = format!("Новая заявка{}", marker_line(Verdict::Decline));
        assert_eq!(resolution_of(&body), Some(Resolution::Declined));
    }

    #[test]
    fn test_resolution_survives_markup_stripping() {
        // Telegram hands the callback handler plain text without entities.
        let plain = "Новая заявка\n\n✅ Заявка подтверждена.";
        assert_eq!(resolution_of(plain), Some(Resolution::Approved));
    }

    #[test]
    fn test_review_request_tokens_carry_user_id() {
        let request = ReviewRequest {
            user_id: 777,
            display_name: "@someone".to_string(),
            kind: FlowKind::Withdraw,
            fields: HashMap::new(),
        };
        assert_eq!(request.approve_token(), "approve_withdraw:777");
        assert_eq!(request.decline_token(), "decline_withdraw:777");
    }

    #[test]
    fn test_missing_field_renders_placeholder() {
        let request = ReviewRequest {
            user_id: 1,
            display_name: "x".to_string(),
            kind: FlowKind::Deposit,
            fields: HashMap::new(),
        };
        assert_eq!(request.field(field::ACCOUNT), "—");
        assert_eq!(request.receipt_file_id(), None);
    }
}
