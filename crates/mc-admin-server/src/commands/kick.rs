use mc_admin_command::{argument, permission, ActionResult, ArgKind, CommandError, CommandSpec, Message};
use mc_admin_world::Text;

use super::{player_name, resolve_online, CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("kick", "Disconnect players", permission::ADMIN).form(
        vec![
            argument("targets", ArgKind::Targets),
            argument("reason", ArgKind::Greedy).optional(),
        ],
        kick,
    )
}

fn kick(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let Some(target) = ctx.args.targets("targets") else {
        return Err(CommandError::failed("argument.entity.notfound.player", vec![]));
    };
    let reason = match ctx.args.word("reason") {
        Some(reason) => Text::literal(reason),
        None => Text::key("multiplayer.disconnect.kicked"),
    };
    let ids = resolve_online(state, ctx.source, target)?;

    let mut result = ActionResult::new(0);
    for id in ids {
        let name = player_name(state, id);
        if state.disconnect(id, reason.clone()) {
            result.code += 1;
            result.push(Message::broadcast(Text::translatable(
                "commands.kick.success",
                vec![name, reason.clone()],
            )));
        }
    }
    Ok(result)
}
