use mc_admin_command::{
    argument, permission, resolve_profiles, ActionResult, ArgKind, CommandError, CommandSpec,
    Message,
};
use mc_admin_world::Text;

use super::{CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("op", "Grant operator status", permission::ADMIN)
        .form(vec![argument("targets", ArgKind::Targets)], op)
}

pub fn spec_deop() -> CommandSpec<ServerState> {
    CommandSpec::new("deop", "Revoke operator status", permission::ADMIN)
        .form(vec![argument("targets", ArgKind::Targets)], deop)
}

fn op(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    update(state, ctx, true)
}

fn deop(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    update(state, ctx, false)
}

fn update(state: &mut ServerState, ctx: &Ctx<'_>, grant: bool) -> CommandResult {
    let Some(target) = ctx.args.targets("targets") else {
        return Err(CommandError::failed("argument.player.unknown", vec![]));
    };
    let profiles = resolve_profiles(target, ctx.source, state.players.as_ref(), &mut state.rng)?;

    let (success, failed) = if grant {
        ("commands.op.success", "commands.op.failed")
    } else {
        ("commands.deop.success", "commands.deop.failed")
    };
    let mut result = ActionResult::new(0);
    for profile in profiles {
        let changed = if grant {
            state.players.add_op(&profile.name)
        } else {
            state.players.remove_op(&profile.name)
        };
        if changed {
            result.code += 1;
            result.push(Message::broadcast(Text::translatable(
                success,
                vec![Text::literal(profile.name)],
            )));
        }
    }
    if result.code == 0 {
        return Err(CommandError::already(failed, vec![]));
    }
    state.persist();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::Fixture;
    use mc_admin_command::{permission, ErrorKind};

    #[test]
    fn op_grants_permission_level() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run_console("op Bob").unwrap(), 1);
        assert!(fx.state.players.is_op("bob"));
        let bob = fx.state.players.player_by_name("Bob").unwrap();
        assert_eq!(bob.permission_level, permission::OWNER);

        let err = fx.run_console("op Bob").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyInState);
        assert_eq!(err.reason_key(), Some("commands.op.failed"));
    }

    #[test]
    fn op_counts_only_new_operators() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run_console("op @a").unwrap(), 2);
    }

    #[test]
    fn deop_revokes() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run_console("deop Alice").unwrap(), 1);
        assert!(!fx.state.players.is_op("Alice"));
        assert_eq!(
            fx.state.players.player_by_name("Alice").unwrap().permission_level,
            permission::ALL
        );
        let err = fx.run_console("deop Alice").unwrap_err();
        assert_eq!(err.reason_key(), Some("commands.deop.failed"));
    }

    #[test]
    fn deopped_player_loses_access() {
        let mut fx = Fixture::new();
        let alice = fx.source("Alice");
        assert!(fx.run(alice, "time set 100").is_ok());
        fx.run_console("deop Alice").unwrap();
        let alice = fx.source("Alice");
        let err = fx.run(alice, "time set 100").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
