//! Command definitions: name, permission level, and the forms it accepts.

use mc_admin_world::Text;

use crate::arguments::{ArgKind, Args};
use crate::dispatcher::CommandContext;
use crate::error::{CommandError, RegistryError};
use crate::message::ActionResult;
use crate::reader::Token;

/// Function run once a form has matched and the source is authorized.
pub type Action<S> = fn(&mut S, &CommandContext<'_, S>) -> Result<ActionResult, CommandError>;

/// One position in a form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Param {
    /// A fixed word.
    Literal(&'static str),
    /// A typed value. Optional parameters may only be followed by optional ones.
    Argument {
        name: &'static str,
        kind: ArgKind,
        optional: bool,
    },
}

pub fn literal(word: &'static str) -> Param {
    Param::Literal(word)
}

pub fn argument(name: &'static str, kind: ArgKind) -> Param {
    Param::Argument {
        name,
        kind,
        optional: false,
    }
}

impl Param {
    pub fn optional(self) -> Self {
        match self {
            Param::Argument { name, kind, .. } => Param::Argument {
                name,
                kind,
                optional: true,
            },
            literal => literal,
        }
    }

    fn is_optional(&self) -> bool {
        matches!(self, Param::Argument { optional: true, .. })
    }
}

/// A parameter sequence bound to an action.
pub struct Overload<S> {
    pub params: Vec<Param>,
    pub action: Action<S>,
}

pub struct CommandSpec<S> {
    name: &'static str,
    description: &'static str,
    permission: u8,
    overloads: Vec<Overload<S>>,
}

/// How far a failed form got, for picking the most relevant error.
///
/// Between forms that failed at the same token, a bad argument beats a wrong
/// literal, which beats leftover input.
struct Mismatch {
    progress: usize,
    rank: u8,
    error: CommandError,
}

impl Mismatch {
    const TRAILING: u8 = 0;
    const LITERAL: u8 = 1;
    const ARGUMENT: u8 = 2;

    fn new(progress: usize, rank: u8, error: CommandError) -> Self {
        Self {
            progress,
            rank,
            error,
        }
    }

    fn key(&self) -> (usize, u8) {
        (self.progress, self.rank)
    }
}

impl<S> CommandSpec<S> {
    pub fn new(name: &'static str, description: &'static str, permission: u8) -> Self {
        Self {
            name,
            description,
            permission,
            overloads: Vec::new(),
        }
    }

    /// Add a form. Forms are tried in the order they were added.
    pub fn form(mut self, params: Vec<Param>, action: Action<S>) -> Self {
        self.overloads.push(Overload { params, action });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn permission(&self) -> u8 {
        self.permission
    }

    pub fn overloads(&self) -> &[Overload<S>] {
        &self.overloads
    }

    pub(crate) fn validate(&self) -> Result<(), RegistryError> {
        if self.overloads.is_empty() {
            return Err(RegistryError::NoForms(self.name.to_string()));
        }
        for overload in &self.overloads {
            let first_optional = overload.params.iter().position(Param::is_optional);
            if let Some(i) = first_optional {
                if !overload.params[i..].iter().all(Param::is_optional) {
                    return Err(RegistryError::OptionalBeforeRequired(self.name.to_string()));
                }
            }
        }
        Ok(())
    }

    /// One usage line per form, e.g. `/ban <targets> [<reason>]`.
    pub fn usage(&self) -> Vec<String> {
        self.overloads
            .iter()
            .map(|overload| {
                let mut line = format!("/{}", self.name);
                for param in &overload.params {
                    line.push(' ');
                    match param {
                        Param::Literal(word) => line.push_str(word),
                        Param::Argument {
                            name,
                            kind,
                            optional,
                        } => {
                            let placeholder = kind.usage(name);
                            if *optional {
                                line.push_str(&format!("[{placeholder}]"));
                            } else {
                                line.push_str(&placeholder);
                            }
                        }
                    }
                }
                line
            })
            .collect()
    }

    /// Match the argument tokens against each form in turn. The first form that
    /// consumes every token wins; if none does, the error from the form that got
    /// furthest is returned.
    pub(crate) fn parse(
        &self,
        line: &str,
        tokens: &[Token<'_>],
    ) -> Result<(Args, Action<S>), CommandError> {
        let mut best: Option<Mismatch> = None;
        for overload in &self.overloads {
            match parse_form(&overload.params, line, tokens) {
                Ok(args) => return Ok((args, overload.action)),
                Err(mismatch) => {
                    if best.as_ref().map_or(true, |b| mismatch.key() > b.key()) {
                        best = Some(mismatch);
                    }
                }
            }
        }
        Err(best
            .map(|m| m.error)
            .unwrap_or_else(|| incomplete(line)))
    }
}

fn incomplete(line: &str) -> CommandError {
    CommandError::invalid("", line.len(), Text::key("command.incomplete"))
}

fn parse_form(params: &[Param], line: &str, tokens: &[Token<'_>]) -> Result<Args, Mismatch> {
    let mut args = Args::default();
    let mut i = 0;
    for param in params {
        match *param {
            Param::Literal(word) => {
                let Some(token) = tokens.get(i) else {
                    return Err(Mismatch::new(i, Mismatch::ARGUMENT, incomplete(line)));
                };
                if token.text != word {
                    return Err(Mismatch::new(
                        i,
                        Mismatch::LITERAL,
                        CommandError::invalid(
                            token.text,
                            token.start,
                            Text::key("command.unknown.argument"),
                        ),
                    ));
                }
                args.push_literal(word);
                i += 1;
            }
            Param::Argument {
                name,
                kind,
                optional,
            } => {
                if i >= tokens.len() {
                    if optional {
                        break;
                    }
                    return Err(Mismatch::new(i, Mismatch::ARGUMENT, incomplete(line)));
                }
                match kind.parse(&tokens[i..], line) {
                    Ok((value, used)) => {
                        args.push_value(name, value);
                        i += used;
                    }
                    Err(error) => return Err(Mismatch::new(i, Mismatch::ARGUMENT, error)),
                }
            }
        }
    }
    if let Some(extra) = tokens.get(i) {
        return Err(Mismatch::new(
            i,
            Mismatch::TRAILING,
            CommandError::invalid(extra.text, extra.start, Text::key("command.trailing_input")),
        ));
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::reader::tokenize;

    fn noop(_: &mut (), _: &CommandContext<'_, ()>) -> Result<ActionResult, CommandError> {
        Ok(ActionResult::new(1))
    }

    fn other(_: &mut (), _: &CommandContext<'_, ()>) -> Result<ActionResult, CommandError> {
        Ok(ActionResult::new(2))
    }

    fn time_spec() -> CommandSpec<()> {
        CommandSpec::new("time", "", 2)
            .form(
                vec![literal("set"), argument("time", ArgKind::Time { min: 0 })],
                noop,
            )
            .form(
                vec![
                    literal("set"),
                    argument("preset", ArgKind::Keyword(&["day", "night"])),
                ],
                other,
            )
            .form(
                vec![literal("add"), argument("time", ArgKind::Time { min: 0 })],
                noop,
            )
    }

    fn parse(spec: &CommandSpec<()>, line: &str) -> Result<(Args, Action<()>), CommandError> {
        let tokens = tokenize(line);
        spec.parse(line, &tokens[1..])
    }

    #[test]
    fn picks_first_matching_form() {
        let spec = time_spec();
        let (args, _) = parse(&spec, "time set 100").unwrap();
        assert_eq!(args.time("time"), Some(100));
        assert_eq!(args.literal(0), Some("set"));

        let (args, _) = parse(&spec, "time set day").unwrap();
        assert_eq!(args.keyword("preset"), Some("day"));
    }

    #[test]
    fn reports_furthest_error() {
        let spec = time_spec();
        let err = parse(&spec, "time add xyz").unwrap_err();
        match err {
            CommandError::InvalidArgument {
                token, position, ..
            } => {
                assert_eq!(token, "xyz");
                assert_eq!(position, 9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_literal() {
        let err = parse(&time_spec(), "time rewind 5").unwrap_err();
        assert_eq!(err.reason_key(), Some("command.unknown.argument"));
    }

    #[test]
    fn missing_and_trailing_tokens() {
        let spec = time_spec();
        let missing = parse(&spec, "time set").unwrap_err();
        assert_eq!(missing.reason_key(), Some("command.incomplete"));
        assert_eq!(missing.kind(), ErrorKind::InvalidArgument);

        let trailing = parse(&spec, "time set 5 6").unwrap_err();
        assert_eq!(trailing.reason_key(), Some("command.trailing_input"));
    }

    #[test]
    fn bad_argument_beats_trailing_input() {
        let spec = CommandSpec::new("gamerule", "", 2)
            .form(vec![literal("keepInventory")], noop)
            .form(
                vec![literal("keepInventory"), argument("value", ArgKind::Bool)],
                other,
            );
        let err = parse(&spec, "gamerule keepInventory 3").unwrap_err();
        assert_eq!(err.reason_key(), Some("parsing.bool.invalid"));
    }

    #[test]
    fn optional_trailing_argument() {
        let spec = CommandSpec::new("kick", "", 3).form(
            vec![
                argument("targets", ArgKind::Targets),
                argument("reason", ArgKind::Greedy).optional(),
            ],
            noop,
        );
        let (args, _) = parse(&spec, "kick Bob").unwrap();
        assert!(!args.has("reason"));
        let (args, _) = parse(&spec, "kick Bob go away").unwrap();
        assert_eq!(args.word("reason"), Some("go away"));
    }

    #[test]
    fn validate_rejects_bad_forms() {
        let empty: CommandSpec<()> = CommandSpec::new("x", "", 0);
        assert_eq!(empty.validate(), Err(RegistryError::NoForms("x".into())));

        let bad = CommandSpec::new("y", "", 0).form(
            vec![
                argument("a", ArgKind::Word).optional(),
                argument("b", ArgKind::Word),
            ],
            noop,
        );
        assert_eq!(
            bad.validate(),
            Err(RegistryError::OptionalBeforeRequired("y".into()))
        );
    }

    #[test]
    fn usage_lines() {
        let spec = CommandSpec::new("ban", "", 3).form(
            vec![
                argument("targets", ArgKind::Targets),
                argument("reason", ArgKind::Greedy).optional(),
            ],
            noop,
        );
        assert_eq!(spec.usage(), vec!["/ban <targets> [<reason>]"]);
        assert_eq!(
            time_spec().usage()[1],
            "/time set (day|night)"
        );
    }
}
