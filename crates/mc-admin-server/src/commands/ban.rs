use mc_admin_command::{
    argument, permission, resolve_profiles, ActionResult, ArgKind, CommandError, CommandSpec,
    Message,
};
use mc_admin_world::{BanEntry, PlayerKey, Text};

use super::{CommandResult, Ctx};
use crate::state::ServerState;

/// Reason recorded when none is given.
pub const DEFAULT_REASON: &str = "Banned by an operator.";

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("ban", "Ban players by name", permission::ADMIN).form(
        vec![
            argument("targets", ArgKind::Targets),
            argument("reason", ArgKind::Greedy).optional(),
        ],
        ban,
    )
}

fn ban(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let Some(target) = ctx.args.targets("targets") else {
        return Err(CommandError::failed("argument.entity.notfound.player", vec![]));
    };
    let reason = ctx.args.word("reason").unwrap_or(DEFAULT_REASON).to_string();
    let profiles = resolve_profiles(target, ctx.source, state.players.as_ref(), &mut state.rng)?;

    let mut result = ActionResult::new(0);
    for profile in profiles {
        let entry = BanEntry::new(&profile.name, &ctx.source.name, &reason);
        if !state
            .players
            .bans_mut()
            .players
            .add(PlayerKey::new(&profile.name), entry)
        {
            continue;
        }
        result.code += 1;
        result.push(Message::broadcast(Text::translatable(
            "commands.ban.success",
            vec![Text::literal(profile.name), Text::literal(reason.clone())],
        )));
        if let Some(id) = profile.id {
            state.disconnect(id, Text::key("multiplayer.disconnect.banned"));
        }
    }

    if result.code == 0 {
        return Err(CommandError::already("commands.ban.failed", vec![]));
    }
    state.persist();
    Ok(result)
}
