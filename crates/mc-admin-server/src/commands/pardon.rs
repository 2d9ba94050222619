use std::net::IpAddr;

use mc_admin_command::{
    argument, permission, resolve_profiles, ActionResult, ArgKind, CommandError, CommandSpec,
    Message,
};
use mc_admin_world::{PlayerKey, Text};

use super::{CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("pardon", "Remove players from the ban list", permission::ADMIN)
        .form(vec![argument("targets", ArgKind::Targets)], pardon)
}

pub fn spec_ip() -> CommandSpec<ServerState> {
    CommandSpec::new("pardon-ip", "Remove an address from the ban list", permission::ADMIN)
        .form(vec![argument("target", ArgKind::Word)], pardon_ip)
}

fn pardon(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let Some(target) = ctx.args.targets("targets") else {
        return Err(CommandError::failed("argument.player.unknown", vec![]));
    };
    let profiles = resolve_profiles(target, ctx.source, state.players.as_ref(), &mut state.rng)?;

    let mut result = ActionResult::new(0);
    for profile in profiles {
        let removed = state
            .players
            .bans_mut()
            .players
            .remove(&PlayerKey::new(&profile.name));
        if let Some(entry) = removed {
            result.code += 1;
            result.push(Message::broadcast(Text::translatable(
                "commands.pardon.success",
                vec![Text::literal(entry.target)],
            )));
        }
    }
    if result.code == 0 {
        return Err(CommandError::already("commands.pardon.failed", vec![]));
    }
    state.persist();
    Ok(result)
}

fn pardon_ip(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let ip: IpAddr = ctx
        .args
        .word("target")
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| CommandError::failed("commands.pardonip.invalid", vec![]))?;
    if state.players.bans_mut().ips.remove(&ip).is_none() {
        return Err(CommandError::already("commands.pardonip.failed", vec![]));
    }
    state.persist();
    Ok(ActionResult::broadcast(
        1,
        Text::translatable("commands.pardonip.success", vec![Text::literal(ip.to_string())]),
    ))
}
