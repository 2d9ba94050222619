//! Chat text: either a literal string or a translation key with arguments.
//!
//! Rendering translation keys into a language is the job of whoever displays
//! the text; this type only carries the key and its positional arguments.

use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Literal(String),
    Translatable {
        key: Cow<'static, str>,
        args: Vec<Text>,
    },
}

impl Text {
    pub fn literal(s: impl Into<String>) -> Self {
        Text::Literal(s.into())
    }

    /// A translation key with no arguments.
    pub fn key(key: &'static str) -> Self {
        Text::Translatable {
            key: Cow::Borrowed(key),
            args: Vec::new(),
        }
    }

    pub fn translatable(key: &'static str, args: Vec<Text>) -> Self {
        Text::Translatable {
            key: Cow::Borrowed(key),
            args,
        }
    }

    /// The translation key, if this is translatable text.
    pub fn translation_key(&self) -> Option<&str> {
        match self {
            Text::Literal(_) => None,
            Text::Translatable { key, .. } => Some(key),
        }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::Literal(s.to_string())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::Literal(s)
    }
}

/// Untranslated form, used for logs: `key[arg, arg]`.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Text::Literal(s) => f.write_str(s),
            Text::Translatable { key, args } => {
                f.write_str(key)?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str("]")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nests_arguments() {
        let text = Text::translatable(
            "commands.ban.success",
            vec![Text::literal("Bob"), Text::key("multiplayer.disconnect.banned")],
        );
        assert_eq!(
            text.to_string(),
            "commands.ban.success[Bob, multiplayer.disconnect.banned]"
        );
        assert_eq!(text.translation_key(), Some("commands.ban.success"));
    }

    #[test]
    fn literal_has_no_key() {
        assert_eq!(Text::from("hi").translation_key(), None);
    }
}
