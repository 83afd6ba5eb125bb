//! Merchant QR payment link derivation
//!
//! The Mbank deep link embeds an EMV-style payload. Most of the payload is a
//! fixed merchant template; only the transaction amount field varies: the sum
//! in tyiyn (som × 100), prefixed with its decimal digit count.

/// Payload up to (and including) the amount field tag.
const QR_PAYLOAD_PREFIX: &str =
    "https://app.mbank.kg/qr/#00020101021132500012c2c.mbank.kg0102021012996779588011120211130211520499995303417540";

/// Payload after the amount field (merchant name and checksum).
const QR_PAYLOAD_SUFFIX: &str = "5908BELEK%20T.6304646a";

/// Merchant phone number shown next to the payment link.
pub const PAYMENT_PHONE: &str = "+996 779588011";

/// Encodes an amount in som as the length-prefixed tyiyn field.
///
/// 500 som → 50000 tyiyn → "550000" (5 digits, then the digits).
pub fn encode_amount(amount: u64) -> String {
    let scaled = amount * 100;
    let digits = scaled.to_string();
    format!("{}{}", digits.len(), digits)
}

/// Builds the full Mbank payment link for the given amount in som.
pub fn mbank_payment_url(amount: u64) -> String {
    format!("{}{}{}", QR_PAYLOAD_PREFIX, encode_amount(amount), QR_PAYLOAD_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_amount_scales_and_prefixes() {
        assert_eq!(encode_amount(500), "550000");
        assert_eq!(encode_amount(1), "3100");
        assert_eq!(encode_amount(45_000), "74500000");
    }

    #[test]
    fn test_payment_url_embeds_encoded_amount() {
        let url = mbank_payment_url(500);
        assert!(url.starts_with("https://app.mbank.kg/qr/#"));
        assert!(url.contains("540550000"), "amount field missing in {}", url);
        assert!(url.ends_with("6304646a"));
    }

    #[test]
    fn test_payment_url_differs_per_amount() {
        assert_ne!(mbank_payment_url(100), mbank_payment_url(200));
    }
}
