use markdown_gateway::infrastructure::observability::{mask_secret, redact_secrets};

#[test]
fn given_long_key_when_masking_then_only_last_four_chars_remain() {
    assert_eq!(mask_secret("sk-abcdefghijklmnop"), "****mnop");
}

#[test]
fn given_short_key_when_masking_then_nothing_is_revealed() {
    assert_eq!(mask_secret("12345678"), "****");
    assert_eq!(mask_secret(""), "****");
}

#[test]
fn given_text_with_credentials_when_redacting_then_values_are_replaced() {
    let text = "Authorization: Bearer abc.def.ghi and url ?key=AIzaSyA123&x=1";

    let redacted = redact_secrets(text);

    assert_eq!(
        redacted,
        "Authorization: Bearer [REDACTED] and url ?key=[REDACTED]&x=1"
    );
}

#[test]
fn given_bare_key_literals_when_redacting_then_they_are_replaced() {
    let redacted = redact_secrets("invalid key sk-proj-1234567890 or gsk_abcdefghijk");

    assert_eq!(redacted, "invalid key [REDACTED] or [REDACTED]");
}

#[test]
fn given_text_without_secrets_when_redacting_then_it_is_unchanged() {
    assert_eq!(redact_secrets("model not found"), "model not found");
}
