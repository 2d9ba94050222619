//! `gamerule`: two forms per rule, generated from [`GameRule::ALL`].

use mc_admin_command::{
    argument, literal, permission, ActionResult, ArgKind, CommandError, CommandSpec,
};
use mc_admin_world::{GameRule, Packet, RuleType, RuleValue, Text};

use super::{CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    GameRule::ALL.iter().fold(
        CommandSpec::new("gamerule", "Show or change a game rule", permission::GAMEMASTER),
        |spec, rule| {
            let kind = match rule.rule_type() {
                RuleType::Bool => ArgKind::Bool,
                RuleType::Int { min, max } => ArgKind::Integer { min, max },
            };
            spec.form(vec![literal(rule.id())], query)
                .form(vec![literal(rule.id()), argument("value", kind)], set)
        },
    )
}

fn matched_rule(ctx: &Ctx<'_>) -> Result<GameRule, CommandError> {
    ctx.args
        .literal(0)
        .and_then(GameRule::from_id)
        .ok_or_else(|| CommandError::failed("command.unknown.argument", vec![]))
}

fn query(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let rule = matched_rule(ctx)?;
    let value = state.level.game_rules().get(rule);
    Ok(ActionResult::success(
        value.as_int(),
        Text::translatable(
            "commands.gamerule.query",
            vec![Text::literal(rule.id()), Text::literal(value.to_string())],
        ),
    ))
}

fn set(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let rule = matched_rule(ctx)?;
    let value = match (ctx.args.boolean("value"), ctx.args.int("value")) {
        (Some(b), _) => RuleValue::Bool(b),
        (None, Some(v)) => RuleValue::Int(v),
        (None, None) => return Err(CommandError::failed("command.incomplete", vec![])),
    };
    state
        .level
        .set_game_rule(rule, value)
        .map_err(|e| CommandError::ActionFailed(Text::literal(e.to_string())))?;
    state.network.broadcast(Packet::GameRuleChanged { rule, value });
    Ok(ActionResult::broadcast(
        value.as_int(),
        Text::translatable(
            "commands.gamerule.set",
            vec![Text::literal(rule.id()), Text::literal(value.to_string())],
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Fixture;
    use mc_admin_command::ErrorKind;

    #[test]
    fn two_forms_per_rule() {
        assert_eq!(spec().overloads().len(), GameRule::ALL.len() * 2);
    }

    #[test]
    fn query_and_set_bool_rule() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run_console("gamerule keepInventory").unwrap(), 0);
        assert_eq!(fx.run_console("gamerule keepInventory true").unwrap(), 1);
        assert!(fx.state.level.game_rules().get_bool(GameRule::KeepInventory));
        assert_eq!(fx.run_console("gamerule keepInventory").unwrap(), 1);
        let out = fx.packets();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn set_int_rule_within_range() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run_console("gamerule randomTickSpeed 10").unwrap(), 10);
        assert_eq!(
            fx.state.level.game_rules().get_int(GameRule::RandomTickSpeed),
            10
        );
        let err = fx.run_console("gamerule spawnChunkRadius 99").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.reason_key(), Some("argument.integer.big"));
    }

    #[test]
    fn value_type_is_checked_while_parsing() {
        let mut fx = Fixture::new();
        let err = fx.run_console("gamerule keepInventory 3").unwrap_err();
        assert_eq!(err.reason_key(), Some("parsing.bool.invalid"));
        let err = fx.run_console("gamerule randomTickSpeed yes").unwrap_err();
        assert_eq!(err.reason_key(), Some("parsing.int.invalid"));
        let err = fx.run_console("gamerule noSuchRule").unwrap_err();
        assert_eq!(err.reason_key(), Some("command.unknown.argument"));
    }
}
