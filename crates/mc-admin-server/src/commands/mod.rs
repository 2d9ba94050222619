//! Administrative command handlers.
//!
//! Every handler is a plain function over [`ServerState`]; each module
//! exposes a `spec()` describing its forms and permission level.

mod ban;
mod ban_ip;
mod banlist;
mod debugconfig;
mod difficulty;
mod gamerule;
mod help;
mod kick;
mod kill;
mod list;
mod op;
mod pardon;
mod serverpack;
mod spawn;
mod time;
mod transfer;
mod weather;

#[cfg(test)]
pub(crate) mod testing;

use mc_admin_command::{
    require_players, ActionResult, CommandContext, CommandError, CommandRegistry, CommandSource,
    RegistryError, TargetSpec,
};
use mc_admin_world::{PlayerId, Text};

use crate::state::ServerState;

pub type Ctx<'a> = CommandContext<'a, ServerState>;
pub type CommandResult = Result<ActionResult, CommandError>;

/// Build the registry with every command.
pub fn register_all() -> Result<CommandRegistry<ServerState>, RegistryError> {
    let mut registry = CommandRegistry::new();
    for spec in [
        help::spec(),
        list::spec(),
        ban::spec(),
        ban_ip::spec(),
        banlist::spec(),
        pardon::spec(),
        pardon::spec_ip(),
        kick::spec(),
        op::spec(),
        op::spec_deop(),
        kill::spec(),
        difficulty::spec(),
        gamerule::spec(),
        time::spec(),
        weather::spec(),
        spawn::spec_world(),
        spawn::spec_point(),
        transfer::spec(),
        serverpack::spec(),
        debugconfig::spec(),
    ] {
        registry.register(spec)?;
    }
    Ok(registry)
}

/// The player running the command, if it is an online player.
fn source_player(state: &ServerState, source: &CommandSource) -> Result<PlayerId, CommandError> {
    source
        .player
        .filter(|id| state.players.player(*id).is_some())
        .ok_or_else(|| CommandError::failed("permissions.requires.player", vec![]))
}

/// Resolve the `targets` argument, or fall back to the source player.
fn targets_or_self(state: &mut ServerState, ctx: &Ctx<'_>) -> Result<Vec<PlayerId>, CommandError> {
    match ctx.args.targets("targets") {
        Some(target) => resolve_online(state, ctx.source, target),
        None => Ok(vec![source_player(state, ctx.source)?]),
    }
}

/// Resolve a target to at least one online player.
fn resolve_online(
    state: &mut ServerState,
    source: &CommandSource,
    target: &TargetSpec,
) -> Result<Vec<PlayerId>, CommandError> {
    require_players(target, source, state.players.as_ref(), &mut state.rng)
}

fn player_name(state: &ServerState, id: PlayerId) -> Text {
    let name = state
        .players
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_default();
    Text::literal(name)
}

fn num(n: impl ToString) -> Text {
    Text::literal(n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Fixture;
    use mc_admin_command::{permission, ErrorKind};

    #[test]
    fn registers_every_command() {
        let registry = register_all().unwrap();
        let names: Vec<&str> = registry.commands().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "ban",
                "ban-ip",
                "banlist",
                "debugconfig",
                "deop",
                "difficulty",
                "gamerule",
                "help",
                "kick",
                "kill",
                "list",
                "op",
                "pardon",
                "pardon-ip",
                "serverpack",
                "setworldspawn",
                "spawnpoint",
                "time",
                "transfer",
                "weather",
            ]
        );
    }

    #[test]
    fn permission_levels() {
        let registry = register_all().unwrap();
        let level = |name: &str| registry.get(name).unwrap().permission();
        assert_eq!(level("help"), permission::ALL);
        assert_eq!(level("list"), permission::ALL);
        assert_eq!(level("time"), permission::GAMEMASTER);
        assert_eq!(level("ban"), permission::ADMIN);
        assert_eq!(level("transfer"), permission::ADMIN);
    }

    /// Every mutating command refused to a level-0 player leaves no trace.
    #[test]
    fn unauthorized_commands_have_no_side_effects() {
        let mut fx = Fixture::new();
        let bob = fx.source("Bob");
        let before_time = fx.state.level.day_time();
        let before_spawn = fx.state.level.default_spawn();
        for line in [
            "ban Alice",
            "ban-ip 10.0.0.1",
            "pardon Alice",
            "kick Alice",
            "op Bob",
            "deop Alice",
            "kill Alice",
            "difficulty hard",
            "gamerule keepInventory true",
            "time set 5000",
            "weather rain 100",
            "setworldspawn 1 2 3",
            "spawnpoint Alice 1 2 3",
            "transfer example.org 25566 @a",
            "serverpack pop",
            "debugconfig config Alice",
        ] {
            let err = fx.run(bob.clone(), line).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized, "{line}");
        }
        assert!(fx.packets().is_empty());
        assert!(fx.sink.messages().is_empty());
        assert_eq!(fx.state.players.players().len(), 3);
        assert!(fx.state.players.bans().players.is_empty());
        assert!(fx.state.players.bans().ips.is_empty());
        assert!(!fx.state.players.is_op("Bob"));
        assert!(fx.state.players.is_op("Alice"));
        assert_eq!(fx.state.level.day_time(), before_time);
        assert_eq!(fx.state.level.default_spawn(), before_spawn);
        assert!(!fx.state.level.weather().raining);
    }

    #[test]
    fn players_without_permission_see_unknown_command() {
        let mut fx = Fixture::new();
        let bob = fx.source("Bob");
        let unauthorized = fx.run(bob.clone(), "ban Alice").unwrap_err();
        let unknown = fx.run(bob, "frobnicate").unwrap_err();
        assert_eq!(unauthorized.to_text(), unknown.to_text());
    }

    #[test]
    fn player_only_forms_need_a_player() {
        let mut fx = Fixture::new();
        let err = fx.run_console("kill").unwrap_err();
        assert_eq!(err.reason_key(), Some("permissions.requires.player"));
    }
}
