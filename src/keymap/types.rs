//! Core key types: Keystroke, Modifiers, KeyCode, SpecialKey

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// True when a chord modifier (ctrl/alt/meta) is held, i.e. the key
    /// won't produce text
    pub const fn is_chord(self) -> bool {
        self.ctrl() || self.alt() || self.meta()
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, case preserved so it can be entered as text
    Char(char),

    Enter,
    NumpadEnter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    Up,
    Down,
    Left,
    Right,

    Home,
    End,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::NumpadEnter => write!(f, "NumEnter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
        }
    }
}

/// Keys that keydown dispatch treats specially.
///
/// Backspace and Delete collapse into [`SpecialKey::Delete`]; both Enter keys
/// collapse into [`SpecialKey::Return`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Tab,
    Delete,
    Return,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Create a keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            mods: Modifiers::NONE,
        }
    }

    /// Create an unmodified character keystroke
    pub const fn char(c: char) -> Self {
        Self {
            key: KeyCode::Char(c),
            mods: Modifiers::NONE,
        }
    }

    pub fn special_key(&self) -> Option<SpecialKey> {
        match self.key {
            KeyCode::Tab => Some(SpecialKey::Tab),
            KeyCode::Backspace | KeyCode::Delete => Some(SpecialKey::Delete),
            KeyCode::Enter | KeyCode::NumpadEnter => Some(SpecialKey::Return),
            KeyCode::Escape => Some(SpecialKey::Escape),
            KeyCode::Up => Some(SpecialKey::Up),
            KeyCode::Down => Some(SpecialKey::Down),
            KeyCode::Left => Some(SpecialKey::Left),
            KeyCode::Right => Some(SpecialKey::Right),
            _ => None,
        }
    }

    /// The character this keystroke types into a text field, if any.
    /// Shift uppercases letters with a single-char uppercase form.
    pub fn text(&self) -> Option<char> {
        if self.mods.is_chord() {
            return None;
        }
        match self.key {
            KeyCode::Char(c) if self.mods.shift() => {
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) => Some(u),
                    _ => Some(c),
                }
            }
            KeyCode::Char(c) => Some(c),
            KeyCode::Space => Some(' '),
            _ => None,
        }
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_backspace_and_delete_are_both_delete() {
        assert_eq!(
            Keystroke::key(KeyCode::Backspace).special_key(),
            Some(SpecialKey::Delete)
        );
        assert_eq!(
            Keystroke::key(KeyCode::Delete).special_key(),
            Some(SpecialKey::Delete)
        );
    }

    #[test]
    fn test_enter_variants_are_return() {
        assert_eq!(Keystroke::key(KeyCode::Enter).special_key(), Some(SpecialKey::Return));
        assert_eq!(
            Keystroke::key(KeyCode::NumpadEnter).special_key(),
            Some(SpecialKey::Return)
        );
    }

    #[test]
    fn test_text_keeps_case_and_skips_chords() {
        assert_eq!(Keystroke::char('A').text(), Some('A'));
        assert_eq!(Keystroke::key(KeyCode::Space).text(), Some(' '));
        assert_eq!(Keystroke::new(KeyCode::Char('v'), Modifiers::CTRL).text(), None);
        assert_eq!(Keystroke::new(KeyCode::Char('A'), Modifiers::SHIFT).text(), Some('A'));
        assert_eq!(Keystroke::key(KeyCode::Tab).text(), None);
    }

    #[test]
    fn test_shift_uppercases_typed_letters() {
        let shifted = |c| Keystroke::new(KeyCode::Char(c), Modifiers::SHIFT).text();
        assert_eq!(shifted('a'), Some('A'));
        assert_eq!(shifted('1'), Some('1'));
        assert_eq!(shifted('ß'), Some('ß'));
        assert_eq!(crate::keymap::parse_key_string("shift+a").unwrap().text(), Some('A'));
    }

    #[test]
    fn test_keystroke_display() {
        let stroke = Keystroke::new(KeyCode::Char('s'), Modifiers::CTRL);
        assert_eq!(stroke.to_string(), "Ctrl+s");
    }
}
