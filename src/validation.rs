//! Input checks shared by the store and the HTTP layer.

/// Longest vocabulary name accepted, in characters.
pub const MAX_NAME_CHARS: usize = 64;

/// Longest word or phrase accepted on either side of a pair, in characters.
pub const MAX_WORD_CHARS: usize = 256;

/// Longest group chat title accepted, in characters.
pub const MAX_CHAT_TITLE_CHARS: usize = 128;

/// Longest logged example sentence, in characters.
pub const MAX_SENTENCE_CHARS: usize = 1024;

/// Trim and check a vocabulary name: 1-64 characters, no control characters.
pub fn normalize_name(name: &str) -> Result<String, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err("name must be at most 64 characters");
    }
    if trimmed.chars().any(char::is_control) {
        return Err("name must not contain control characters");
    }
    Ok(trimmed.to_string())
}

/// Trim a group chat title; it must be non-empty and fit Telegram's limit.
pub fn normalize_chat_title(title: &str) -> Result<String, &'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("title must not be empty");
    }
    if trimmed.chars().count() > MAX_CHAT_TITLE_CHARS {
        return Err("title must be at most 128 characters");
    }
    Ok(trimmed.to_string())
}

/// Trim and check one side of a word pair.
pub fn normalize_word_text(text: &str) -> Result<String, &'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("word text must not be empty");
    }
    if trimmed.chars().count() > MAX_WORD_CHARS {
        return Err("word text must be at most 256 characters");
    }
    Ok(trimmed.to_string())
}

pub fn normalize_sentence(text: &str) -> Result<String, &'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("sentence must not be empty");
    }
    if trimmed.chars().count() > MAX_SENTENCE_CHARS {
        return Err("sentence must be at most 1024 characters");
    }
    Ok(trimmed.to_string())
}

/// Lowercased, trimmed, de-duplicated tokens with empties dropped; first
/// occurrence order is kept.
pub fn normalize_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref().trim().to_lowercase();
        if !token.is_empty() && !out.contains(&token) {
            out.push(token);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(normalize_name("  Spanish A1 ").unwrap(), "Spanish A1");
    }

    #[test]
    fn blank_name_rejected() {
        assert!(normalize_name("   ").is_err());
    }

    #[test]
    fn long_name_rejected() {
        assert!(normalize_name(&"x".repeat(65)).is_err());
        assert!(normalize_name(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn control_characters_rejected() {
        assert!(normalize_name("bad\u{0007}name").is_err());
    }

    #[test]
    fn chat_title_limit() {
        assert_eq!(normalize_chat_title(" Club ").unwrap(), "Club");
        assert!(normalize_chat_title(&"t".repeat(128)).is_ok());
        assert!(normalize_chat_title(&"t".repeat(129)).is_err());
    }

    #[test]
    fn word_text_length_counts_chars_not_bytes() {
        assert!(normalize_word_text(&"ü".repeat(256)).is_ok());
        assert!(normalize_word_text(&"ü".repeat(257)).is_err());
    }

    #[test]
    fn tokens_are_normalized_and_deduplicated() {
        let tokens = normalize_tokens(&[" Casa ", "casa", "", "PERRO", "  "]);
        assert_eq!(tokens, vec!["casa".to_string(), "perro".to_string()]);
    }
}
