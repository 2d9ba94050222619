use mc_admin_command::{argument, literal, permission, ActionResult, ArgKind, CommandSpec};
use mc_admin_world::{Packet, Text};
use uuid::Uuid;

use super::{num, CommandResult, Ctx};
use crate::state::ServerState;

pub fn spec() -> CommandSpec<ServerState> {
    CommandSpec::new("serverpack", "Push or pop server resource packs", permission::GAMEMASTER)
        .form(
            vec![
                literal("push"),
                argument("url", ArgKind::Word),
                argument("id", ArgKind::Uuid).optional(),
                argument("hash", ArgKind::Sha1).optional(),
            ],
            push,
        )
        .form(
            vec![literal("pop"), argument("id", ArgKind::Uuid).optional()],
            pop,
        )
}

/// Pack id derived from the url when none is given.
pub fn pack_id(url: &str) -> Uuid {
    Uuid::new_v3(&Uuid::NAMESPACE_URL, url.as_bytes())
}

/// Sends to every open connection, whatever its phase.
fn send_all(state: &mut ServerState, packet: Packet) -> usize {
    state
        .network
        .connections()
        .into_iter()
        .filter(|&connection| state.network.send(connection, packet.clone()))
        .count()
}

fn push(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let url = ctx.args.word("url").unwrap_or_default().to_string();
    let id = ctx.args.uuid("id").unwrap_or_else(|| pack_id(&url));
    let hash = ctx.args.word("hash").unwrap_or_default().to_string();
    let reached = send_all(
        state,
        Packet::ResourcePackPush {
            id,
            url: url.clone(),
            hash,
            required: false,
        },
    );
    Ok(ActionResult::success(
        reached as i32,
        Text::translatable("commands.serverpack.push", vec![Text::literal(url), num(reached)]),
    ))
}

fn pop(state: &mut ServerState, ctx: &Ctx<'_>) -> CommandResult {
    let id = ctx.args.uuid("id");
    let reached = send_all(state, Packet::ResourcePackPop { id });
    Ok(ActionResult::success(
        reached as i32,
        Text::translatable("commands.serverpack.pop", vec![num(reached)]),
    ))
}
