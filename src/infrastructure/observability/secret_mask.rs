use std::sync::LazyLock;

use regex::Regex;

const VISIBLE_SUFFIX: usize = 4;

static SECRET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(bearer\s+|api[_-]?key["']?\s*[=:]\s*["']?|x-api-key:\s*|key=|token=|secret=|password=)[^\s"'&,}]+"#,
    )
    .expect("static pattern")
});
static KEY_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:sk-[A-Za-z0-9_\-]{8,}|gsk_[A-Za-z0-9]{8,}|AIza[A-Za-z0-9_\-]{16,})")
        .expect("static pattern")
});

/// Masks an API key for logs, keeping only its last few characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= VISIBLE_SUFFIX * 2 {
        return "****".to_string();
    }
    let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    format!("****{suffix}")
}

/// Redacts credentials that a remote service may echo back in an error body.
pub fn redact_secrets(text: &str) -> String {
    let redacted = SECRET_PATTERN.replace_all(text, "${1}[REDACTED]");
    KEY_LITERAL.replace_all(&redacted, "[REDACTED]").into_owned()
}
