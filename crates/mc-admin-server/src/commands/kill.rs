use mc_admin_command::{argument, permission, ActionResult, ArgKind, CommandSpec};
use mc_admin_world::{GameRule, Packet, Text};

use super::{num, player_name, targets_or_self, CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("kill", "Kill players", permission::GAMEMASTER)
        .form(vec![], kill)
        .form(vec![argument("targets", ArgKind::Targets)], kill)
}

/// Already-dead targets count as killed but see no further effect.
fn kill(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let ids = targets_or_self(state, ctx)?;
    let show_deaths = state.rule(GameRule::ShowDeathMessages);

    for &id in &ids {
        let Some(player) = state.players.player_mut(id) else {
            continue;
        };
        if !player.is_alive() {
            continue;
        }
        player.health = 0.0;
        let connection = player.connection;
        let message = Text::translatable(
            "death.attack.genericKill",
            vec![Text::literal(player.name.clone())],
        );
        state.network.send(
            connection,
            Packet::PlayerCombatKill {
                player: id,
                message: message.clone(),
            },
        );
        if show_deaths {
            state.network.broadcast(Packet::SystemChat {
                text: message,
                overlay: false,
            });
        }
    }

    let text = match ids.as_slice() {
        [only] => Text::translatable("commands.kill.success.single", vec![player_name(state, *only)]),
        _ => Text::translatable("commands.kill.success.multiple", vec![num(ids.len())]),
    };
    Ok(ActionResult::broadcast(ids.len() as i32, text))
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::Fixture;
    use mc_admin_world::{GameRule, Packet, RuleValue};

    #[test]
    fn kills_self_without_arguments() {
        let mut fx = Fixture::new();
        let alice = fx.source("Alice");
        let id = alice.player.unwrap();
        assert_eq!(fx.run(alice, "kill").unwrap(), 1);
        assert_eq!(fx.state.players.player(id).unwrap().health, 0.0);
        let out = fx.packets();
        // the combat packet plus a death message to each of the three players
        assert_eq!(out.len(), 4);
        assert!(matches!(out[0].packet, Packet::PlayerCombatKill { player, .. } if player == id));
    }

    #[test]
    fn dead_players_are_not_killed_twice() {
        let mut fx = Fixture::new();
        fx.state
            .level
            .set_game_rule(GameRule::ShowDeathMessages, RuleValue::Bool(false))
            .unwrap();
        assert_eq!(fx.run_console("kill Bob").unwrap(), 1);
        assert_eq!(fx.packets().len(), 1);
        assert_eq!(fx.run_console("kill @a").unwrap(), 3);
        assert_eq!(fx.packets().len(), 2);
        assert!(fx.state.players.players().iter().all(|p| !p.is_alive()));
    }
}
