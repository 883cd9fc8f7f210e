use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureKeyError {
    #[error("texture key must not be empty")]
    Empty,
    #[error("texture key must not start with '/'")]
    LeadingSlash,
    #[error("texture key must not contain '\\'")]
    Backslash,
    #[error("texture key must not contain '..'")]
    ParentTraversal,
    #[error("texture key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

pub(crate) fn validate_texture_key(key: &str) -> Result<(), TextureKeyError> {
    if key.is_empty() {
        return Err(TextureKeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(TextureKeyError::LeadingSlash);
    }
    if key.contains('\\') {
        return Err(TextureKeyError::Backslash);
    }
    if key.contains("..") {
        return Err(TextureKeyError::ParentTraversal);
    }
    for ch in key.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-') {
            continue;
        }
        return Err(TextureKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_texture_key;

    #[test]
    fn accepts_valid_keys() {
        for key in ["alan", "ships/player_1", "powerup-speed", "boss_2"] {
            assert!(validate_texture_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_invalid_keys() {
        for key in ["", "/alan", "..", "a/../b", r"a\b", "Alan", "alan.png"] {
            assert!(validate_texture_key(key).is_err(), "key={key}");
        }
    }
}
