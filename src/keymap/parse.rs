//! Key string parsing ("tab", "shift+a", "ctrl+backspace")

use super::types::{KeyCode, Keystroke, Modifiers};

/// Parse a key string like "shift+tab" into a Keystroke.
///
/// Single characters keep their case, so "A" types an uppercase letter.
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeyParseError> {
    if key_str.is_empty() {
        return Err(KeyParseError::Empty);
    }
    // A lone "+" is the plus key, not a separator
    if key_str == "+" {
        return Ok(Keystroke::char('+'));
    }

    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.to_lowercase();
        match part_lower.as_str() {
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" | "cmd" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(KeyParseError::MultipleKeys(key_str.to_string()));
                }
                key_part = Some(parse_key_code(part)?);
            }
        }
    }

    let key = key_part.ok_or_else(|| KeyParseError::MissingKey(key_str.to_string()))?;
    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeyParseError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match key.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "numpad_enter" | "numenter" => Ok(KeyCode::NumpadEnter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),

        _ => Err(KeyParseError::UnknownKey(key.to_string())),
    }
}

/// Errors from [`parse_key_string`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    Empty,
    UnknownKey(String),
    MultipleKeys(String),
    MissingKey(String),
}

impl std::fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyParseError::Empty => write!(f, "Empty key string"),
            KeyParseError::UnknownKey(k) => write!(f, "Unknown key: {}", k),
            KeyParseError::MultipleKeys(k) => write!(f, "Multiple keys in: {}", k),
            KeyParseError::MissingKey(k) => write!(f, "No key found in: {}", k),
        }
    }
}

impl std::error::Error for KeyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_key_string("tab").unwrap(), Keystroke::key(KeyCode::Tab));
        assert_eq!(parse_key_string("Return").unwrap(), Keystroke::key(KeyCode::Enter));
        assert_eq!(
            parse_key_string("backspace").unwrap(),
            Keystroke::key(KeyCode::Backspace)
        );
    }

    #[test]
    fn test_parse_char_keeps_case() {
        assert_eq!(parse_key_string("A").unwrap(), Keystroke::char('A'));
        assert_eq!(parse_key_string("+").unwrap(), Keystroke::char('+'));
    }

    #[test]
    fn test_parse_with_modifiers() {
        let stroke = parse_key_string("ctrl+shift+z").unwrap();
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
        assert_eq!(stroke.key, KeyCode::Char('z'));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_key_string(""), Err(KeyParseError::Empty));
        assert!(matches!(
            parse_key_string("hyper"),
            Err(KeyParseError::UnknownKey(_))
        ));
        assert!(matches!(
            parse_key_string("a+b"),
            Err(KeyParseError::MultipleKeys(_))
        ));
        assert!(matches!(
            parse_key_string("ctrl+shift"),
            Err(KeyParseError::MissingKey(_))
        ));
    }
}
