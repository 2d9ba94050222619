use mc_admin_command::{
    argument, permission, resolve_players, ActionResult, ArgKind, CommandError, CommandSpec,
};
use mc_admin_world::{Packet, Text};
use tracing::info;

use super::{num, player_name, CommandResult, Ctx};
use crate::state::ServerState;

pub const DEFAULT_PORT: u16 = 25565;

pub fn spec() -> CommandSpec<ServerState> {
    let port = || argument("port", ArgKind::Integer { min: 1, max: 65535 });
    CommandSpec::new("transfer", "Send players to another server", permission::ADMIN)
        .form(vec![argument("hostname", ArgKind::Word)], transfer)
        .form(vec![argument("hostname", ArgKind::Word), port()], transfer)
        .form(
            vec![
                argument("hostname", ArgKind::Word),
                port(),
                argument("players", ArgKind::Targets),
            ],
            transfer,
        )
}

fn transfer(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let host = ctx.args.word("hostname").unwrap_or_default().to_string();
    let port = ctx
        .args
        .int("port")
        .and_then(|p| u16::try_from(p).ok())
        .unwrap_or(DEFAULT_PORT);
    let ids = match ctx.args.targets("players") {
        Some(target) => resolve_players(target, ctx.source, state.players.as_ref(), &mut state.rng)?,
        None => ctx
            .source
            .player
            .filter(|id| state.players.player(*id).is_some())
            .into_iter()
            .collect(),
    };
    if ids.is_empty() {
        return Err(CommandError::failed("commands.transfer.error.no_players", vec![]));
    }

    for &id in &ids {
        let Some(connection) = state.players.player(id).map(|p| p.connection) else {
            continue;
        };
        state.network.send(
            connection,
            Packet::Transfer {
                host: host.clone(),
                port,
            },
        );
        info!("Transferring {} to {}:{}", player_name(state, id), host, port);
    }

    let text = match ids.as_slice() {
        [only] => Text::translatable(
            "commands.transfer.success.single",
            vec![player_name(state, *only), Text::literal(host.as_str()), num(port)],
        ),
        _ => Text::translatable(
            "commands.transfer.success.multiple",
            vec![num(ids.len()), Text::literal(host.as_str()), num(port)],
        ),
    };
    Ok(ActionResult::broadcast(ids.len() as i32, text))
}
