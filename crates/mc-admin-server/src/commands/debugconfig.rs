//! `debugconfig`: move players between the play and configuration phases.

use mc_admin_command::{
    argument, literal, permission, ActionResult, ArgKind, CommandError, CommandSpec, Message,
};
use mc_admin_world::{Packet, ProtocolPhase, Text};

use super::{player_name, resolve_online, CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("debugconfig", "Switch players' protocol phase", permission::ADMIN)
        .form(
            vec![literal("config"), argument("targets", ArgKind::Targets)],
            config,
        )
        .form(
            vec![literal("unconfig"), argument("targets", ArgKind::Targets)],
            unconfig,
        )
}

fn config(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    switch(
        state,
        ctx,
        ProtocolPhase::Play,
        ProtocolPhase::Configuration,
        Packet::StartConfiguration,
        "commands.debugconfig.config",
    )
}

fn unconfig(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    switch(
        state,
        ctx,
        ProtocolPhase::Configuration,
        ProtocolPhase::Play,
        Packet::FinishConfiguration,
        "commands.debugconfig.unconfig",
    )
}

/// Players not currently in `from` are skipped.
fn switch(
    state: &mut ServerState,
    ctx: &Ctx<'_>,
    from: ProtocolPhase,
    to: ProtocolPhase,
    packet: Packet,
    key: &'static str,
) -> CommandResult {
    let Some(target) = ctx.args.targets("targets") else {
        return Err(CommandError::failed("command.incomplete", vec![]));
    };
    let ids = resolve_online(state, ctx.source, target)?;

    let mut result = ActionResult::new(0);
    for id in ids {
        let Some(connection) = state.players.player(id).map(|p| p.connection) else {
            continue;
        };
        if state.network.phase(connection) != Some(from) {
            continue;
        }
        state.network.send(connection, packet.clone());
        state.network.set_phase(connection, to);
        result.code += 1;
        result.push(Message::success(Text::translatable(
            key,
            vec![player_name(state, id)],
        )));
    }
    if result.code == 0 {
        return Err(CommandError::already("commands.debugconfig.failed", vec![]));
    }
    Ok(result)
}
