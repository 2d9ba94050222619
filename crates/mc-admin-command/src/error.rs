//! Command failures and their user-facing rendering.

use mc_admin_world::Text;
use thiserror::Error;

/// Coarse classification of a [`CommandError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Unauthorized,
    AlreadyInState,
    ActionFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Unknown command, or a named target that does not exist.
    #[error("not found: {0}")]
    NotFound(Text),

    /// `position` is the byte offset of `token` in the command line.
    #[error("invalid argument {token:?} at position {position}: {reason}")]
    InvalidArgument {
        token: String,
        position: usize,
        reason: Text,
    },

    #[error("permission denied for /{0}")]
    Unauthorized(String),

    #[error("already in requested state: {0}")]
    AlreadyInState(Text),

    #[error("action failed: {0}")]
    ActionFailed(Text),
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::NotFound(_) => ErrorKind::NotFound,
            CommandError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            CommandError::Unauthorized(_) => ErrorKind::Unauthorized,
            CommandError::AlreadyInState(_) => ErrorKind::AlreadyInState,
            CommandError::ActionFailed(_) => ErrorKind::ActionFailed,
        }
    }

    pub fn not_found(key: &'static str, args: Vec<Text>) -> Self {
        CommandError::NotFound(Text::translatable(key, args))
    }

    pub fn already(key: &'static str, args: Vec<Text>) -> Self {
        CommandError::AlreadyInState(Text::translatable(key, args))
    }

    pub fn failed(key: &'static str, args: Vec<Text>) -> Self {
        CommandError::ActionFailed(Text::translatable(key, args))
    }

    pub fn invalid(token: &str, position: usize, reason: Text) -> Self {
        CommandError::InvalidArgument {
            token: token.to_string(),
            position,
            reason,
        }
    }

    /// Translation key identifying why the command failed.
    pub fn reason_key(&self) -> Option<&str> {
        match self {
            CommandError::NotFound(text)
            | CommandError::AlreadyInState(text)
            | CommandError::ActionFailed(text)
            | CommandError::InvalidArgument { reason: text, .. } => text.translation_key(),
            CommandError::Unauthorized(_) => None,
        }
    }

    /// The failure message shown to the source. A permission failure reads
    /// exactly like an unknown command.
    pub fn to_text(&self) -> Text {
        match self {
            CommandError::NotFound(text)
            | CommandError::AlreadyInState(text)
            | CommandError::ActionFailed(text) => text.clone(),
            CommandError::InvalidArgument {
                token,
                position,
                reason,
            } => Text::translatable(
                "command.context.parse_error",
                vec![
                    reason.clone(),
                    Text::literal(position.to_string()),
                    Text::literal(token.clone()),
                ],
            ),
            CommandError::Unauthorized(_) => Text::key("command.unknown.command"),
        }
    }
}

/// Programmer errors detected while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command /{0} is already registered")]
    Duplicate(String),

    #[error("command /{0} has no forms")]
    NoForms(String),

    #[error("command /{0} has a required parameter after an optional one")]
    OptionalBeforeRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_renders_as_unknown_command() {
        let unauthorized = CommandError::Unauthorized("ban".into());
        let unknown = CommandError::not_found("command.unknown.command", vec![]);
        assert_eq!(unauthorized.to_text(), unknown.to_text());
        assert_eq!(unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(unknown.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn reason_key_exposes_translation_key() {
        let err = CommandError::failed("commands.transfer.error.no_players", vec![]);
        assert_eq!(err.kind(), ErrorKind::ActionFailed);
        assert_eq!(err.reason_key(), Some("commands.transfer.error.no_players"));
    }

    #[test]
    fn invalid_argument_mentions_token_and_position() {
        let err = CommandError::invalid("abc", 9, Text::key("parsing.int.invalid"));
        assert_eq!(
            err.to_string(),
            "invalid argument \"abc\" at position 9: parsing.int.invalid"
        );
        assert_eq!(
            err.to_text().to_string(),
            "command.context.parse_error[parsing.int.invalid, 9, abc]"
        );
    }
}
